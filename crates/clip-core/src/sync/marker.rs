use chrono::{DateTime, Utc};

/// Creation time of the newest snapshot a pipeline has already handled.
///
/// Never moves backwards. A snapshot is new only when its timestamp is
/// strictly greater than the marker.
///
/// 已处理快照的最新创建时间，单调不减。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LastProcessedMarker(Option<DateTime<Utc>>);

impl LastProcessedMarker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    pub fn is_new(&self, created_at: DateTime<Utc>) -> bool {
        match self.0 {
            Some(last) => created_at > last,
            None => true,
        }
    }

    /// Moves the marker to `created_at` if that is later. Returns whether it moved.
    pub fn advance(&mut self, created_at: DateTime<Utc>) -> bool {
        if self.is_new(created_at) {
            self.0 = Some(created_at);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
    }

    #[test]
    fn empty_marker_accepts_anything() {
        assert!(LastProcessedMarker::new().is_new(at(0)));
    }

    #[test]
    fn equal_timestamp_is_not_new() {
        let mut marker = LastProcessedMarker::new();
        assert!(marker.advance(at(100)));
        assert!(!marker.is_new(at(100)));
        assert!(!marker.advance(at(100)));
    }

    #[test]
    fn marker_never_moves_backwards() {
        let mut marker = LastProcessedMarker::new();
        marker.advance(at(200));
        assert!(!marker.advance(at(100)));
        assert_eq!(marker.get(), Some(at(200)));
    }
}
