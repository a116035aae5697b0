use chrono::{Local, Timelike};

/// Rotation angles for the two clock hands, in degrees.
///
/// Negative angles rotate the hands clockwise when the dial is viewed
/// from the default camera position on +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub hour_deg: f32,
    pub minute_deg: f32,
}

/// Compute hand angles from a timestamp.
///
/// The hour hand advances continuously with the minutes; the minute hand
/// jumps in whole-minute steps like a real analog clock, so there is no
/// smoothing between ticks.
pub fn hand_angles(time: &impl Timelike) -> HandAngles {
    let hour = time.hour() as f32;
    let minute = time.minute() as f32;

    HandAngles {
        hour_deg: -((hour + minute / 60.0) * 30.0),
        minute_deg: -(minute * 6.0),
    }
}

/// Hand angles for the host's current local time.
pub fn local_hand_angles() -> HandAngles {
    hand_angles(&Local::now())
}
