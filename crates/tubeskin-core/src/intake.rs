//! Identifier intake - turns the form's text into a player route

use crate::{route::Route, types::VideoId, Error, Result};
use tracing::{debug, info};

/// Something that can move the app to another route
#[cfg_attr(test, mockall::automock)]
pub trait Navigator {
    fn navigate(&self, route: &Route);
}

/// Route for a submitted identifier.
///
/// Empty input is rejected. Anything else, whitespace included, is forwarded untouched.
pub fn route_for(raw: &str) -> Result<Route> {
    let video_id = VideoId::new(raw);
    if video_id.is_empty() {
        return Err(Error::EmptyIdentifier);
    }
    Ok(Route::player(video_id))
}

/// Handle a form submission. Empty input is a silent no-op.
///
/// Returns the route navigated to, if any.
pub fn submit(raw: &str, navigator: &dyn Navigator) -> Option<Route> {
    match route_for(raw) {
        Ok(route) => {
            info!(route = %route, "Opening player");
            navigator.navigate(&route);
            Some(route)
        }
        Err(err) => {
            debug!(code = err.error_code(), "Ignoring submission");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    #[test]
    fn test_empty_submission_never_navigates() {
        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().never();

        assert_eq!(submit("", &navigator), None);
    }

    #[test]
    fn test_whitespace_submission_navigates() {
        let expected = Route::player(VideoId::new("   "));
        let mut navigator = MockNavigator::new();
        navigator
            .expect_navigate()
            .with(eq(expected.clone()))
            .times(1)
            .return_const(());

        assert_eq!(submit("   ", &navigator), Some(expected));
    }

    #[test]
    fn test_submission_navigates_to_player() {
        let expected = Route::player(VideoId::new("abc123"));
        let mut navigator = MockNavigator::new();
        navigator
            .expect_navigate()
            .with(eq(expected.clone()))
            .times(1)
            .return_const(());

        assert_eq!(submit("abc123", &navigator), Some(expected));
    }

    #[test]
    fn test_identifier_forwarded_untrimmed() {
        let route = route_for(" abc ").unwrap();
        assert_eq!(route, Route::player(VideoId::new(" abc ")));
    }

    #[test]
    fn test_route_for_empty() {
        assert!(matches!(route_for(""), Err(Error::EmptyIdentifier)));
    }
}
