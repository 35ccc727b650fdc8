//! Attendance (shift) records.
//!
//! A record is created `Open` on clock-in and becomes `Closed` when the
//! employee clocks out. There is no way back to `Open`.

use super::EmployeeId;
use serde::Serialize;

super::row_id! {
    /// Row id of an attendance record.
    AttendanceRecordId
}

/// Whether a shift has been closed by a clock-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftState {
    Open,
    Closed,
}

impl ShiftState {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// One clock-in/clock-out pair.
///
/// Timestamps are Unix milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceRecord {
    pub id: AttendanceRecordId,
    pub employee_id: EmployeeId,
    pub clock_in: i64,
    pub clock_out: Option<i64>,
}

impl AttendanceRecord {
    #[must_use]
    pub const fn state(&self) -> ShiftState {
        if self.clock_out.is_some() {
            ShiftState::Closed
        } else {
            ShiftState::Open
        }
    }

    /// Worked time for a closed shift.
    #[must_use]
    pub fn duration_ms(&self) -> Option<i64> {
        self.clock_out.map(|out| out - self.clock_in)
    }
}

/// Outcome of a clock-out request.
///
/// Having nothing to close is an ordinary answer, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClockOut {
    /// Every open record of the employee was closed at `clock_out`.
    Closed {
        record_ids: Vec<AttendanceRecordId>,
        clock_out: i64,
    },
    /// The employee had no open record; nothing changed.
    NotClockedIn,
}

impl ClockOut {
    #[must_use]
    pub fn closed_count(&self) -> usize {
        match self {
            Self::Closed { record_ids, .. } => record_ids.len(),
            Self::NotClockedIn => 0,
        }
    }
}

/// Format worked time as `HhMMm`.
#[must_use]
pub fn format_duration(ms: i64) -> String {
    let minutes = ms.max(0) / 60_000;
    format!("{}h{:02}m", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(clock_out: Option<i64>) -> AttendanceRecord {
        AttendanceRecord {
            id: AttendanceRecordId(1),
            employee_id: EmployeeId(1),
            clock_in: 1_000,
            clock_out,
        }
    }

    #[test]
    fn test_state_follows_clock_out() {
        assert_eq!(record(None).state(), ShiftState::Open);
        assert_eq!(record(Some(2_000)).state(), ShiftState::Closed);
    }

    #[test]
    fn test_duration_only_for_closed() {
        assert_eq!(record(None).duration_ms(), None);
        assert_eq!(record(Some(61_000)).duration_ms(), Some(60_000));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0h00m");
        assert_eq!(format_duration(90 * 60_000), "1h30m");
        assert_eq!(format_duration(-5), "0h00m");
    }

    #[test]
    fn test_clock_out_json_is_tagged() {
        let json = serde_json::to_value(ClockOut::NotClockedIn).unwrap();
        assert_eq!(json["status"], "not_clocked_in");

        let closed = ClockOut::Closed {
            record_ids: vec![AttendanceRecordId(4), AttendanceRecordId(5)],
            clock_out: 10,
        };
        assert_eq!(closed.closed_count(), 2);
        let json = serde_json::to_value(closed).unwrap();
        assert_eq!(json["status"], "closed");
        assert_eq!(json["record_ids"][1], 5);
    }
}
