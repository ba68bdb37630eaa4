use super::ring_event::RingEvent;
use chrono::NaiveDate;

/// Query filter over the ring log. Every criterion is optional and they are
/// AND-combined; an empty shift list or empty search text means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RingFilter {
    pub range: Option<(NaiveDate, NaiveDate)>,
    pub shifts: Vec<String>,
    pub search: Option<String>,
}

impl RingFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.range = Some((start, end));
        self
    }

    pub fn with_shifts<I, S>(mut self, shifts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shifts = shifts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_search(mut self, q: &str) -> Self {
        self.search = Some(q.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_none() && self.shifts.is_empty() && self.search_needle().is_none()
    }

    fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    pub fn matches(&self, ev: &RingEvent) -> bool {
        if let Some((start, end)) = self.range {
            // unparsable timestamps never fall inside a range
            match ev.date() {
                Some(d) if d >= start && d <= end => {}
                _ => return false,
            }
        }

        if !self.shifts.is_empty() && !self.shifts.iter().any(|s| *s == ev.shift) {
            return false;
        }

        if let Some(needle) = self.search_needle() {
            let hit = [&ev.name, &ev.username, &ev.badge, &ev.note]
                .iter()
                .any(|f| f.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        true
    }

    pub fn apply(&self, events: &[RingEvent]) -> Vec<RingEvent> {
        events.iter().filter(|e| self.matches(e)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn ev(ts: &str, name: &str, badge: &str, shift: &str) -> RingEvent {
        let at = NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S").unwrap();
        RingEvent::new(at, name, "", badge, "", shift, None)
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let events = vec![
            ev("2025-09-01T08:00:00", "Jane", "", "Day"),
            ev("2025-09-02T23:00:00", "", "12345", "Night"),
        ];
        assert!(RingFilter::all().is_empty());
        assert_eq!(RingFilter::all().apply(&events).len(), 2);
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let events = vec![
            ev("2025-09-01T00:00:00", "a", "", "Day"),
            ev("2025-09-03T23:59:59", "b", "", "Day"),
            ev("2025-09-04T00:00:00", "c", "", "Day"),
        ];
        let f = RingFilter::all().with_range(d("2025-09-01"), d("2025-09-03"));
        let names: Vec<_> = f.apply(&events).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn unparsable_timestamp_only_excluded_by_range() {
        let broken = RingEvent {
            timestamp: "yesterday".into(),
            name: "x".into(),
            ..RingEvent::default()
        };
        assert!(RingFilter::all().matches(&broken));
        let f = RingFilter::all().with_range(d("2025-01-01"), d("2025-12-31"));
        assert!(!f.matches(&broken));
    }

    #[test]
    fn shift_set_and_search_combine() {
        let events = vec![
            ev("2025-09-01T08:00:00", "Jane Doe", "", "Day"),
            ev("2025-09-01T22:00:00", "Jane Roe", "", "Night"),
            ev("2025-09-01T09:00:00", "Bob", "JD-77", "Day"),
        ];
        let f = RingFilter::all().with_shifts(["Day"]).with_search("JANE");
        let hits = f.apply(&events);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Jane Doe");

        let f = RingFilter::all().with_search("jd-");
        assert_eq!(f.apply(&events)[0].name, "Bob");
    }

    #[test]
    fn only_empty_search_is_no_filter() {
        assert!(RingFilter::all().with_search("").is_empty());

        // whitespace is searched for literally
        let events = vec![
            ev("2025-09-01T08:00:00", "Jane Doe", "", "Day"),
            ev("2025-09-01T09:00:00", "Bob", "", "Day"),
        ];
        let f = RingFilter::all().with_search(" ");
        assert!(!f.is_empty());
        let hits = f.apply(&events);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Jane Doe");
    }
}
