use async_graphql::SimpleObject;

/// Outcome of a mutation that has nothing beyond success and a message.
#[derive(Debug, Clone, SimpleObject)]
pub struct StatusPayload {
    pub success: bool,
    pub message: String,
}

impl StatusPayload {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
