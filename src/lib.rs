pub mod config;

pub mod shared {
    pub mod core {
        pub mod clock;
        pub mod primitives;
        pub mod week;
    }
    pub mod application {
        pub mod errors;
    }
    pub mod infrastructure {
        pub mod store;
    }
}

pub mod modules {
    pub mod timer {
        pub mod core {
            pub mod format;
            pub mod report;
            pub mod state;
        }
        pub mod engine;
    }
    pub mod users {
        pub mod core {
            pub mod ports;
            pub mod user;
        }
        pub mod use_cases {
            pub mod register_user {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod current_user {
                pub mod inbound {
                    pub mod http;
                }
            }
        }
    }
    pub mod classes {
        pub mod core {
            pub mod class;
            pub mod ports;
        }
        pub mod use_cases {
            pub mod create_class {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod list_classes {
                pub mod inbound {
                    pub mod http;
                }
            }
        }
    }
    pub mod study_sessions {
        pub mod core {
            pub mod ports;
            pub mod session;
        }
        pub mod use_cases {
            pub mod record_session {
                pub mod command;
                pub mod decide;
                pub mod decision;
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod weekly_totals {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod leaderboard {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
                pub mod projection;
            }
        }
    }
    pub mod feedback {
        pub mod core {
            pub mod feedback;
            pub mod ports;
        }
        pub mod use_cases {
            pub mod post_feedback {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod manage_feedback {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
    }
}

pub mod shell;
