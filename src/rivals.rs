//! Rival window selection within the subject's class

use crate::types::CarState;

/// Nearest same-class rivals around the subject.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RivalWindow<'a> {
    /// Cars ahead in ascending position order; the closest rival is last
    pub ahead: Vec<&'a CarState>,
    /// Cars behind in ascending position order; the closest rival is first
    pub behind: Vec<&'a CarState>,
}

/// Select up to `num_ahead` rivals ahead and `num_behind` rivals behind the subject.
///
/// Only classified cars of the subject's class are considered. Cars sharing a class
/// position are ordered by car id. An unclassified subject has no rivals.
pub fn select_rivals<'a, I>(
    subject: &CarState,
    cars: I,
    num_ahead: usize,
    num_behind: usize,
) -> RivalWindow<'a>
where
    I: IntoIterator<Item = &'a CarState>,
{
    if !subject.is_classified() {
        return RivalWindow::default();
    }

    let mut same_class: Vec<&CarState> = cars
        .into_iter()
        .filter(|car| {
            car.class_id == subject.class_id && car.car_id != subject.car_id && car.is_classified()
        })
        .collect();
    same_class.sort_by_key(|car| (car.position_in_class, car.car_id));

    let split_ahead =
        same_class.partition_point(|car| car.position_in_class < subject.position_in_class);
    let split_behind =
        same_class.partition_point(|car| car.position_in_class <= subject.position_in_class);

    let ahead = &same_class[..split_ahead];
    let behind = &same_class[split_behind..];

    RivalWindow {
        ahead: ahead[ahead.len().saturating_sub(num_ahead)..].to_vec(),
        behind: behind.iter().take(num_behind).copied().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn car(car_id: usize, class_id: i32, position: i32) -> CarState {
        let mut car = CarState::new(car_id, format!("Driver {car_id}"), class_id, false);
        car.position_in_class = position;
        car
    }

    fn ids(cars: &[&CarState]) -> Vec<usize> {
        cars.iter().map(|c| c.car_id).collect()
    }

    #[test]
    fn selects_closest_ahead_and_behind() {
        let subject = car(0, 1, 5);
        let field: Vec<CarState> = (1..=9).map(|p| car(p as usize + 10, 1, p)).collect();

        let window = select_rivals(&subject, &field, 3, 3);

        assert_eq!(
            window.ahead.iter().map(|c| c.position_in_class).collect::<Vec<_>>(),
            vec![2, 3, 4]
        );
        assert_eq!(
            window.behind.iter().map(|c| c.position_in_class).collect::<Vec<_>>(),
            vec![6, 7, 8]
        );
    }

    #[test]
    fn filters_other_classes_subject_and_unclassified() {
        let subject = car(0, 1, 2);
        let field = vec![
            subject.clone(),
            car(1, 1, 1),
            car(2, 2, 1),
            car(3, 1, 0),
            car(4, 1, 3),
            car(5, 2, 3),
        ];

        let window = select_rivals(&subject, &field, 3, 3);
        assert_eq!(ids(&window.ahead), vec![1]);
        assert_eq!(ids(&window.behind), vec![4]);
    }

    #[test]
    fn leader_has_nobody_ahead() {
        let subject = car(0, 1, 1);
        let field = vec![car(1, 1, 2), car(2, 1, 3)];
        let window = select_rivals(&subject, &field, 3, 1);
        assert!(window.ahead.is_empty());
        assert_eq!(ids(&window.behind), vec![1]);
    }

    #[test]
    fn zero_counts_select_nothing() {
        let subject = car(0, 1, 2);
        let field = vec![car(1, 1, 1), car(2, 1, 3)];
        let window = select_rivals(&subject, &field, 0, 0);
        assert!(window.ahead.is_empty());
        assert!(window.behind.is_empty());
    }

    #[test]
    fn ties_break_on_car_id_regardless_of_input_order() {
        let subject = car(0, 1, 5);
        let field = vec![car(9, 1, 3), car(4, 1, 3), car(7, 1, 6), car(2, 1, 6)];

        let window = select_rivals(&subject, &field, 1, 1);
        assert_eq!(ids(&window.ahead), vec![9]);
        assert_eq!(ids(&window.behind), vec![2]);
    }

    #[test]
    fn unclassified_subject_has_no_rivals() {
        let subject = car(0, 1, 0);
        let field = vec![car(1, 1, 1), car(2, 1, 2)];
        let window = select_rivals(&subject, &field, 3, 3);
        assert!(window.ahead.is_empty());
        assert!(window.behind.is_empty());
    }

    #[test]
    fn same_position_as_subject_is_neither_side() {
        let subject = car(0, 1, 4);
        let field = vec![car(1, 1, 4)];
        let window = select_rivals(&subject, &field, 3, 3);
        assert!(window.ahead.is_empty());
        assert!(window.behind.is_empty());
    }

    proptest! {
        #[test]
        fn window_respects_limits_and_adjacency(
            positions in prop::collection::vec(1i32..40, 0..30),
            subject_position in 1i32..40,
            num_ahead in 0usize..5,
            num_behind in 0usize..5,
        ) {
            let subject = car(63, 1, subject_position);
            let field: Vec<CarState> =
                positions.iter().enumerate().map(|(i, p)| car(i, 1, *p)).collect();

            let window = select_rivals(&subject, &field, num_ahead, num_behind);

            prop_assert!(window.ahead.len() <= num_ahead);
            prop_assert!(window.behind.len() <= num_behind);
            prop_assert!(window.ahead.iter().all(|c| c.position_in_class < subject_position));
            prop_assert!(window.behind.iter().all(|c| c.position_in_class > subject_position));

            // Closest ahead is last, closest behind is first
            let best_ahead = positions.iter().filter(|p| **p < subject_position).max();
            let best_behind = positions.iter().filter(|p| **p > subject_position).min();
            if num_ahead > 0 {
                prop_assert_eq!(
                    window.ahead.last().map(|c| c.position_in_class),
                    best_ahead.copied()
                );
            }
            if num_behind > 0 {
                prop_assert_eq!(
                    window.behind.first().map(|c| c.position_in_class),
                    best_behind.copied()
                );
            }

            let ascending = |cars: &[&CarState]| {
                cars.windows(2).all(|w| w[0].position_in_class <= w[1].position_in_class)
            };
            prop_assert!(ascending(&window.ahead));
            prop_assert!(ascending(&window.behind));
        }
    }
}
