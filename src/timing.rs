use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

/// Moment in time, in milliseconds relative to the start of the media file
#[derive(PartialEq, PartialOrd, Eq, Ord, Hash, Debug, Clone, Copy)]
pub struct Moment(i64);

/// Difference between two moments in milliseconds
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub struct TimeDelta(i64);

impl Moment {
    /// Create a moment from timestamp components
    #[must_use]
    pub fn from_timestamp(hours: i64, minutes: i64, seconds: i64, milliseconds: i64) -> Self {
        Moment(((hours * 60 + minutes) * 60 + seconds) * 1000 + milliseconds)
    }

    /// When expressed as a timestamp, the number of hours
    #[must_use]
    pub fn hours(&self) -> i64 {
        self.0 / 1000 / 60 / 60
    }

    /// When expressed as a timestamp, the number of minutes
    #[must_use]
    pub fn minutes(&self) -> i64 {
        (self.0 / 1000 / 60) % 60
    }

    /// When expressed as a timestamp, the number of seconds
    #[must_use]
    pub fn seconds(&self) -> i64 {
        (self.0 / 1000) % 60
    }

    /// Number of milliseconds
    #[must_use]
    pub fn ms(&self) -> i64 {
        self.0 % 1000
    }

    /// Convert to .vtt timestamp format (`HH:MM:SS.0ms`)
    #[must_use]
    pub fn as_vtt_timestamp(&self) -> String {
        format!(
            "{:02}:{:02}:{:02}.{:03}",
            self.hours(),
            self.minutes(),
            self.seconds(),
            self.ms()
        )
    }
}

impl Sub for Moment {
    type Output = TimeDelta;

    fn sub(self, rhs: Moment) -> Self::Output {
        TimeDelta(self.0 - rhs.0)
    }
}

impl Add<TimeDelta> for Moment {
    type Output = Moment;

    fn add(self, rhs: TimeDelta) -> Self::Output {
        Moment(self.0 + rhs.0)
    }
}

impl Sub<TimeDelta> for Moment {
    type Output = Moment;

    fn sub(self, rhs: TimeDelta) -> Self::Output {
        Moment(self.0 - rhs.0)
    }
}

impl AddAssign<TimeDelta> for Moment {
    fn add_assign(&mut self, rhs: TimeDelta) {
        self.0 += rhs.0;
    }
}

impl SubAssign<TimeDelta> for Moment {
    fn sub_assign(&mut self, rhs: TimeDelta) {
        self.0 -= rhs.0;
    }
}

impl From<i64> for Moment {
    fn from(value: i64) -> Self {
        Moment(value)
    }
}

impl From<Moment> for i64 {
    fn from(value: Moment) -> Self {
        value.0
    }
}

impl Add for TimeDelta {
    type Output = TimeDelta;

    fn add(self, rhs: Self) -> Self::Output {
        TimeDelta(self.0 + rhs.0)
    }
}

impl Sub for TimeDelta {
    type Output = TimeDelta;

    fn sub(self, rhs: Self) -> Self::Output {
        TimeDelta(self.0 - rhs.0)
    }
}

impl Mul<i64> for TimeDelta {
    type Output = TimeDelta;

    fn mul(self, rhs: i64) -> Self::Output {
        TimeDelta(self.0 * rhs)
    }
}

impl Div<i64> for TimeDelta {
    type Output = TimeDelta;

    fn div(self, rhs: i64) -> Self::Output {
        TimeDelta(self.0 / rhs)
    }
}

impl From<i64> for TimeDelta {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<TimeDelta> for i64 {
    fn from(value: TimeDelta) -> Self {
        value.0
    }
}
