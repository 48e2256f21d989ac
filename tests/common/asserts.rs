#![allow(dead_code)]

use scoped_cors::{CorsDecision, Headers};

pub fn assert_applied(decision: CorsDecision) -> Headers {
    match decision {
        CorsDecision::Apply(headers) => headers,
        other => panic!("expected headers to apply, got {:?}", other),
    }
}

pub fn assert_rejected(decision: CorsDecision) -> u16 {
    match decision {
        CorsDecision::Reject(status) => status,
        other => panic!("expected a rejection, got {:?}", other),
    }
}

pub fn assert_not_applicable(decision: CorsDecision) {
    match decision {
        CorsDecision::NotApplicable => {}
        other => panic!("expected CORS to not apply, got {:?}", other),
    }
}
