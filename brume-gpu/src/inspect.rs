use glam::Vec4;
use spirv_std::arch::IndexUnchecked;

pub const INSPECT_NONE: u32 = 0;
pub const INSPECT_PREV_UVW: u32 = 1;
pub const INSPECT_REPROJECTION_VALIDITY: u32 = 2;
pub const INSPECT_VIEW_DISTANCE: u32 = 3;
pub const INSPECT_HISTORY_AGE: u32 = 4;

/// Diagnostic sink for the volumetric passes.
///
/// Passes unconditionally offer their intermediates through
/// [`Self::record()`]; only the value matching the channel selected at
/// runtime actually lands in the inspection buffer.
pub struct InspectionSink<'a> {
    items: &'a mut [Vec4],
    channel: u32,
}

impl<'a> InspectionSink<'a> {
    pub fn new(items: &'a mut [Vec4], channel: u32) -> Self {
        Self { items, channel }
    }

    pub fn record(&mut self, channel: u32, idx: usize, value: Vec4) {
        if self.channel == channel {
            unsafe {
                *self.items.index_unchecked_mut(idx) = value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_only_the_selected_channel() {
        let mut items = [Vec4::ZERO; 4];
        let mut sink = InspectionSink::new(&mut items, INSPECT_VIEW_DISTANCE);

        sink.record(INSPECT_PREV_UVW, 0, Vec4::splat(1.0));
        sink.record(INSPECT_VIEW_DISTANCE, 1, Vec4::splat(2.0));

        assert_eq!(Vec4::ZERO, items[0]);
        assert_eq!(Vec4::splat(2.0), items[1]);
    }

    #[test]
    fn none_channel_records_nothing() {
        let mut items = [Vec4::ZERO; 2];
        let mut sink = InspectionSink::new(&mut items, INSPECT_NONE);

        sink.record(INSPECT_PREV_UVW, 0, Vec4::splat(1.0));
        sink.record(INSPECT_HISTORY_AGE, 1, Vec4::splat(1.0));

        assert_eq!([Vec4::ZERO; 2], items);
    }
}
