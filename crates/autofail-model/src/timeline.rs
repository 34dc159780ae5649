use crate::error::AutoFailError;
use crate::hit_object::HitObject;

/// Object times must fit in 32 bits, like the chart format's own times.
const TIME_RANGE: std::ops::RangeInclusive<i64> = i32::MIN as i64..=i32::MAX as i64;

/// All hit objects of a chart, kept sorted by start time.
///
/// Equal start times keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    objects: Vec<HitObject>,
}

impl Timeline {
    pub fn new(objects: Vec<HitObject>) -> Self {
        let mut timeline = Self { objects };
        timeline.sort();
        timeline
    }

    /// Check the preconditions detection relies on.
    pub fn validate(&self) -> Result<(), AutoFailError> {
        if self.objects.is_empty() {
            return Err(AutoFailError::EmptyTimeline);
        }
        for (index, ho) in self.objects.iter().enumerate() {
            if let Some(&time) = [ho.start_time, ho.end_time]
                .iter()
                .find(|time| !TIME_RANGE.contains(time))
            {
                return Err(AutoFailError::TimeOutOfRange { index, time });
            }
            if ho.end_time < ho.start_time {
                return Err(AutoFailError::InvalidHitObject {
                    index,
                    start_time: ho.start_time,
                    end_time: ho.end_time,
                });
            }
        }
        Ok(())
    }

    /// Append a batch of objects and restore start-time order.
    pub fn insert<I>(&mut self, objects: I)
    where
        I: IntoIterator<Item = HitObject>,
    {
        self.objects.extend(objects);
        self.sort();
    }

    /// Up to `count` objects starting at `start`, clamped to the timeline.
    pub fn range(&self, start: usize, count: usize) -> &[HitObject] {
        let start = start.min(self.objects.len());
        let end = start.saturating_add(count).min(self.objects.len());
        &self.objects[start..end]
    }

    /// Latest end time of any object; the overall extent of the chart.
    pub fn max_end_time(&self) -> Option<i64> {
        self.objects.iter().map(|ho| ho.end_time).max()
    }

    pub fn objects(&self) -> &[HitObject] {
        &self.objects
    }

    pub fn get(&self, index: usize) -> Option<&HitObject> {
        self.objects.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HitObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn into_objects(self) -> Vec<HitObject> {
        self.objects
    }

    fn sort(&mut self) {
        self.objects.sort_by_key(|ho| ho.start_time);
    }
}

impl From<Vec<HitObject>> for Timeline {
    fn from(objects: Vec<HitObject>) -> Self {
        Self::new(objects)
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a HitObject;
    type IntoIter = std::slice::Iter<'a, HitObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}
