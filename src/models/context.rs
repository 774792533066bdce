use crate::models::constants::HOST_CONTEXT_ENV;

/// Where `gl` is running: inside the assistant host or from a plain shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecutionContext {
    pub inside_host: bool,
}

impl ExecutionContext {
    /// Detect the context from the process environment.
    pub fn detect() -> Self {
        Self::from_value(std::env::var(HOST_CONTEXT_ENV).ok().as_deref())
    }

    /// Any non-empty value of the host variable means we are inside the host.
    pub fn from_value(value: Option<&str>) -> Self {
        Self {
            inside_host: value.is_some_and(|v| !v.is_empty()),
        }
    }

    pub fn shell() -> Self {
        Self { inside_host: false }
    }

    pub fn host() -> Self {
        Self { inside_host: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_value() {
        assert!(!ExecutionContext::from_value(None).inside_host);
        assert!(!ExecutionContext::from_value(Some("")).inside_host);
        assert!(ExecutionContext::from_value(Some("1")).inside_host);
    }
}
