// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The wheel that gets rebuilt from the active candidates on every change.
//!
//! Angles are measured in degrees, clockwise, with 0° at twelve o'clock where the
//! pointer sits. [`WheelHandle::rotation_angle`] is how far the wheel has turned
//! clockwise from its home position, so the wheel-local angle under the pointer is
//! `(-rotation_angle) mod 360`. Segment `i` of `n` covers the half open wheel-local
//! range `[i * 360/n, (i + 1) * 360/n)`.

use smallvec::SmallVec;

/// The fixed fill palette, assigned to segments cyclically by position. A wheel with
/// more than seven segments wraps around to the first color.
pub const SEGMENT_PALETTE: [Rgb; 7] = [
    Rgb::new(0xf9, 0x41, 0x44),
    Rgb::new(0xf3, 0x72, 0x2c),
    Rgb::new(0xf9, 0xc7, 0x4f),
    Rgb::new(0x90, 0xbe, 0x6d),
    Rgb::new(0x43, 0xaa, 0x8b),
    Rgb::new(0x57, 0x75, 0x90),
    Rgb::new(0x27, 0x7d, 0xa1),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self { Self { red, green, blue } }
}

/// One slice of the wheel: the candidate label it shows, and the palette color it is
/// painted with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub label: String,
    pub fill: Rgb,
}

/// Most wheels have a handful of segments, so keep them inline.
pub type SegmentVec = SmallVec<[Segment; 8]>;

/// A live wheel, built from a non empty set of active candidates.
///
/// Each rebuild produces a fresh handle stamped with the session generation that was
/// current at build time. Spin frames and completions carry the generation they were
/// planned against, which is how signals from a torn down wheel get dropped instead
/// of being applied to its replacement.
#[derive(Clone, Debug, PartialEq)]
pub struct WheelHandle {
    segments: SegmentVec,
    /// Current clockwise rotation in degrees. Starts at 0 and is overwritten by every
    /// animation frame. Not normalized, a finished spin leaves the full accumulated
    /// angle (for example 8 turns plus the stop angle) in place.
    pub rotation_angle: f64,
    generation: u64,
}

impl WheelHandle {
    /// Build a wheel from the given labels, in order, assigning palette colors
    /// cyclically. Returns [None] when `labels` is empty, there is no such thing as a
    /// wheel with zero segments.
    #[must_use]
    pub fn new(labels: impl IntoIterator<Item = String>, generation: u64) -> Option<Self> {
        let segments: SegmentVec = labels
            .into_iter()
            .enumerate()
            .map(|(index, label)| Segment {
                label,
                fill: SEGMENT_PALETTE[index % SEGMENT_PALETTE.len()],
            })
            .collect();

        if segments.is_empty() {
            return None;
        }

        Some(Self {
            segments,
            rotation_angle: 0.0,
            generation,
        })
    }

    #[must_use]
    pub fn segment_count(&self) -> usize { self.segments.len() }

    #[must_use]
    pub fn segments(&self) -> &[Segment] { self.segments.as_slice() }

    /// The angular width of one segment in degrees.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn arc_deg(&self) -> f64 { 360.0 / self.segments.len() as f64 }

    #[must_use]
    pub fn generation(&self) -> u64 { self.generation }

    /// Index of the segment currently under the twelve o'clock pointer.
    #[must_use]
    pub fn indicated_index(&self) -> usize {
        indicated_index_for(self.rotation_angle, self.segments.len())
    }

    /// The segment currently under the twelve o'clock pointer.
    #[must_use]
    pub fn indicated_segment(&self) -> &Segment { &self.segments[self.indicated_index()] }
}

/// Map any angle (negative, or many turns) into `[0, 360)`.
#[must_use]
pub fn normalize_angle(angle_deg: f64) -> f64 { ((angle_deg % 360.0) + 360.0) % 360.0 }

/// Which segment shows at `screen_angle` (degrees clockwise from twelve o'clock) on
/// a wheel of `segment_count` segments rotated clockwise by `rotation_angle`. This
/// is what the canvas painter asks for every cell of the disc.
#[must_use]
#[allow(clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss)]
pub fn segment_index_at(rotation_angle: f64, segment_count: usize, screen_angle: f64) -> usize {
    if segment_count == 0 {
        return 0;
    }
    let arc_deg = 360.0 / segment_count as f64;
    let wheel_local_deg = normalize_angle(screen_angle - rotation_angle);
    let index = (wheel_local_deg / arc_deg) as usize;
    index.min(segment_count - 1)
}

/// Which segment sits under the pointer for a wheel of `segment_count` segments
/// rotated clockwise by `rotation_angle` degrees.
#[must_use]
pub fn indicated_index_for(rotation_angle: f64, segment_count: usize) -> usize {
    segment_index_at(rotation_angle, segment_count, 0.0)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::assert_eq2;

    fn labels(count: usize) -> Vec<String> {
        (0..count).map(|index| format!("label_{index}")).collect()
    }

    #[test]
    fn new_with_no_labels_is_none() {
        assert!(WheelHandle::new(labels(0), 1).is_none());
    }

    #[test]
    fn new_starts_at_home_position() {
        let wheel = WheelHandle::new(labels(4), 7).unwrap();
        assert_eq2!(wheel.rotation_angle, 0.0);
        assert_eq2!(wheel.generation(), 7);
        assert_eq2!(wheel.segment_count(), 4);
        assert_eq2!(wheel.arc_deg(), 90.0);
    }

    #[test]
    fn palette_assignment_is_cyclic() {
        let wheel = WheelHandle::new(labels(9), 0).unwrap();
        let segments = wheel.segments();
        assert_eq2!(segments[0].fill, SEGMENT_PALETTE[0]);
        assert_eq2!(segments[6].fill, SEGMENT_PALETTE[6]);
        assert_eq2!(segments[7].fill, SEGMENT_PALETTE[0]);
        assert_eq2!(segments[8].fill, SEGMENT_PALETTE[1]);
    }

    #[test_case(0.0, 0.0; "zero stays put")]
    #[test_case(360.0, 0.0; "full turn wraps")]
    #[test_case(720.0, 0.0; "two turns wrap")]
    #[test_case(-90.0, 270.0; "negative wraps forward")]
    #[test_case(45.5, 45.5; "in range unchanged")]
    fn normalize_angle_maps_into_range(input: f64, expected: f64) {
        assert_eq2!(normalize_angle(input), expected);
    }

    // Four segments of 90° each. Rotating the wheel clockwise walks the pointer
    // backwards through the segments.
    #[test_case(0.0, 0; "home shows first segment")]
    #[test_case(45.0, 3; "partial turn shows last segment")]
    #[test_case(90.0, 3; "exact arc boundary")]
    #[test_case(180.0, 2; "half turn")]
    #[test_case(359.9, 0; "just before full turn")]
    #[test_case(360.0, 0; "full turn is home again")]
    #[test_case(-45.0, 0; "counter clockwise stays in first")]
    #[test_case(2880.0 + 45.0, 3; "many turns reduce the same")]
    fn indicated_index_for_four_segments(rotation_angle: f64, expected: usize) {
        assert_eq2!(indicated_index_for(rotation_angle, 4), expected);
    }

    // Four segments, wheel turned a quarter clockwise. Walking the screen angle
    // clockwise from the pointer walks the wheel-local angle the same way.
    #[test_case(0.0, 3; "pointer cell")]
    #[test_case(90.0, 0; "first segment rotated into view")]
    #[test_case(180.0, 1; "opposite the pointer")]
    #[test_case(359.9, 2; "just shy of the pointer")]
    fn segment_index_at_for_a_quarter_turned_wheel(screen_angle: f64, expected: usize) {
        assert_eq2!(segment_index_at(90.0, 4, screen_angle), expected);
    }

    #[test]
    fn indicated_index_with_one_segment_is_always_zero() {
        for rotation_angle in [0.0, 13.0, 359.0, 720.5, -77.0] {
            assert_eq2!(indicated_index_for(rotation_angle, 1), 0);
        }
    }

    #[test]
    fn indicated_segment_tracks_rotation() {
        let mut wheel = WheelHandle::new(labels(4), 0).unwrap();
        assert_eq2!(wheel.indicated_segment().label, "label_0");

        wheel.rotation_angle = 180.0;
        assert_eq2!(wheel.indicated_segment().label, "label_2");
    }
}
