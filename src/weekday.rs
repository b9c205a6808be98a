//! Day codes offered by the workout form.
//!
//! A code maps to the label shown on the schedule and to `day_order`, the key
//! the schedule is sorted by. The same table feeds the form options and the
//! insert path.

/// One selectable schedule day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleDay {
    pub code: &'static str,
    pub label: &'static str,
    pub order: i64,
}

pub const SCHEDULE_DAYS: &[ScheduleDay] = &[
    ScheduleDay { code: "1", label: "MONDAY", order: 1 },
    ScheduleDay { code: "2", label: "TUESDAY", order: 2 },
    ScheduleDay { code: "3", label: "WEDNESDAY", order: 3 },
    ScheduleDay { code: "4", label: "THURSDAY", order: 4 },
    ScheduleDay { code: "5", label: "FRIDAY", order: 5 },
    ScheduleDay { code: "6", label: "SATURDAY", order: 6 },
    ScheduleDay { code: "7", label: "SUNDAY", order: 7 },
    ScheduleDay { code: "8", label: "WEEKDAYS", order: 8 },
    ScheduleDay { code: "9", label: "WEEKEND", order: 9 },
];

impl ScheduleDay {
    pub fn from_code(code: &str) -> Option<ScheduleDay> {
        let code = code.trim();
        SCHEDULE_DAYS.iter().copied().find(|day| day.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuesday_code_maps_to_label_and_order() {
        let day = ScheduleDay::from_code("2").unwrap();
        assert_eq!(day.label, "TUESDAY");
        assert_eq!(day.order, 2);
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert!(ScheduleDay::from_code("0").is_none());
        assert!(ScheduleDay::from_code("10").is_none());
        assert!(ScheduleDay::from_code("monday").is_none());
        assert!(ScheduleDay::from_code("").is_none());
    }

    #[test]
    fn orders_follow_the_table() {
        let orders: Vec<i64> = SCHEDULE_DAYS.iter().map(|d| d.order).collect();
        let mut sorted = orders.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(orders, sorted, "orders must be unique and ascending");
        assert!(SCHEDULE_DAYS
            .iter()
            .all(|d| ScheduleDay::from_code(d.code) == Some(*d)));
    }
}
