// Identifier types shared across bounded contexts.
//
// Users, classes and feedback rows are keyed by store-assigned integers.
// Study sessions carry a UUID v7 generated by the inbound adapter instead.

pub type UserId = i64;
pub type ClassId = i64;
pub type FeedbackId = i64;
