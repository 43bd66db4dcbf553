// Composition root.
//
// - auth: caller identification from the gateway header.
// - state: wires one store into every use case handler.
// - http: REST routes plus `/gql`, with CORS and request tracing.
// - graphql: merged query and mutation roots.

pub mod auth;
pub mod graphql;
pub mod http;
pub mod state;
