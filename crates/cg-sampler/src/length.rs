use tracing::debug;

/// Upper bound on generated tokens when neither the caller nor the model
/// bounds the run.
pub const MAX_LENGTH: usize = 10_000;

/// Resolve the number of generation steps for a run.
///
/// - `requested`: the caller's length; negative means "as long as possible".
/// - `max_positions`: the model's position limit; zero or negative means unbounded.
pub fn resolve_length(requested: i64, max_positions: i64) -> usize {
    let resolved = if requested < 0 && max_positions > 0 {
        max_positions as usize
    } else if max_positions > 0 && max_positions < requested {
        max_positions as usize
    } else if requested < 0 {
        MAX_LENGTH
    } else {
        requested as usize
    };

    if resolved as i64 != requested {
        debug!(requested, max_positions, resolved, "resolved generation length");
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_uses_model_limit() {
        assert_eq!(resolve_length(-1, 50), 50);
    }

    #[test]
    fn test_clamps_to_model_limit() {
        assert_eq!(resolve_length(100, 50), 50);
    }

    #[test]
    fn test_unbounded_uses_ceiling() {
        assert_eq!(resolve_length(-1, -1), MAX_LENGTH);
        assert_eq!(resolve_length(-5, 0), MAX_LENGTH);
    }

    #[test]
    fn test_passthrough() {
        assert_eq!(resolve_length(20, 50), 20);
        assert_eq!(resolve_length(50, 50), 50);
        assert_eq!(resolve_length(700, 0), 700);
        assert_eq!(resolve_length(0, 50), 0);
    }
}
