//! Race-active gate

/// Substring that marks a session type label as a race.
pub const RACE_SESSION_MARKER: &str = "Race";

/// Fewest classified cars for a race to be worth reporting.
pub const MIN_CLASSIFIED_CARS: usize = 2;

/// Whether the session is a race with at least two classified cars.
///
/// An unresolved session type is never active.
pub fn is_race_active(session_type: Option<&str>, classified_car_count: usize) -> bool {
    let Some(label) = session_type else {
        return false;
    };

    label.contains(RACE_SESSION_MARKER) && classified_car_count >= MIN_CLASSIFIED_CARS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn practice_is_never_active() {
        for count in [0, 1, 2, 40] {
            assert!(!is_race_active(Some("Practice"), count));
        }
        assert!(!is_race_active(Some("Lone Qualify"), 20));
        assert!(!is_race_active(Some("Warmup"), 20));
    }

    #[test]
    fn race_needs_two_classified_cars() {
        assert!(!is_race_active(Some("Race"), 0));
        assert!(!is_race_active(Some("Race"), 1));
        assert!(is_race_active(Some("Race"), 2));
        assert!(is_race_active(Some("Heat Race"), 12));
    }

    #[test]
    fn unresolved_session_is_inactive() {
        assert!(!is_race_active(None, 30));
    }

    #[test]
    fn marker_is_case_sensitive() {
        assert!(!is_race_active(Some("race"), 10));
    }
}
