use crate::response::Headers;

/// Outcome of negotiating one request against one resolved policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsDecision {
    /// CORS applies; decorate the response with these headers.
    Apply(Headers),
    /// The origin failed to match and the policy demands a short-circuit:
    /// respond with this status code and an empty body.
    Reject(u16),
    /// CORS does not apply; leave the response untouched.
    NotApplicable,
}

impl CorsDecision {
    pub fn is_not_applicable(&self) -> bool {
        matches!(self, CorsDecision::NotApplicable)
    }

    /// The negotiated headers, when the decision is [`CorsDecision::Apply`].
    pub fn headers(&self) -> Option<&Headers> {
        match self {
            CorsDecision::Apply(headers) => Some(headers),
            _ => None,
        }
    }

    /// The short-circuit status, when the decision is [`CorsDecision::Reject`].
    pub fn reject_status(&self) -> Option<u16> {
        match self {
            CorsDecision::Reject(status) => Some(*status),
            _ => None,
        }
    }
}
