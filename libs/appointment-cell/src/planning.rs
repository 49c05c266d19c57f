use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone, Timelike, Utc};
use tracing::debug;

use shared_models::{Availability, BlockDurationConfig};

use crate::models::{AvailabilityDraft, AvailabilityError, PlannedBlock, MAX_SLOTS, MIN_SLOTS};

/// Format of a `datetime-local` style input.
pub const LOCAL_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Returns the new slot count, or `None` when the clamped value equals the
/// current one.
pub fn clamp_slots(current: u8, delta: i32) -> Option<u8> {
    let next = (i32::from(current) + delta).clamp(i32::from(MIN_SLOTS), i32::from(MAX_SLOTS));
    let next = u8::try_from(next).ok()?;
    (next != current).then_some(next)
}

pub fn to_local_input(value: &DateTime<Utc>, offset: &FixedOffset) -> String {
    value.with_timezone(offset).format(LOCAL_INPUT_FORMAT).to_string()
}

pub fn parse_local_input(value: &str, offset: &FixedOffset) -> Option<DateTime<Utc>> {
    let value = value.trim();
    let naive = NaiveDateTime::parse_from_str(value, LOCAL_INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityForm {
    pub start: String,
    pub end: String,
    pub slots: u8,
}

impl AvailabilityForm {
    /// Next whole hour after `now`, lasting 30 minutes, one slot.
    pub fn default_range(now: DateTime<Utc>, offset: &FixedOffset) -> Self {
        Self::default_range_for(now, offset, 30)
    }

    /// Same start as [`Self::default_range`], lasting `block_minutes`.
    pub fn default_range_for(now: DateTime<Utc>, offset: &FixedOffset, block_minutes: u32) -> Self {
        let local = now.with_timezone(offset);
        let hour = local
            .with_minute(0)
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(local);
        let start = hour + Duration::hours(1);
        let end = start + Duration::minutes(i64::from(block_minutes));

        Self {
            start: start.format(LOCAL_INPUT_FORMAT).to_string(),
            end: end.format(LOCAL_INPUT_FORMAT).to_string(),
            slots: 1,
        }
    }

    pub fn submit(&self, offset: &FixedOffset) -> Result<AvailabilityDraft, AvailabilityError> {
        if self.start.trim().is_empty()
            || self.end.trim().is_empty()
            || !(MIN_SLOTS..=MAX_SLOTS).contains(&self.slots)
        {
            return Err(AvailabilityError::MissingFields);
        }

        let (Some(start_at), Some(end_at)) = (
            parse_local_input(&self.start, offset),
            parse_local_input(&self.end, offset),
        ) else {
            return Err(AvailabilityError::InvalidDates);
        };

        if end_at <= start_at {
            return Err(AvailabilityError::EndBeforeStart);
        }

        Ok(AvailabilityDraft {
            start_at,
            end_at,
            slots: self.slots,
        })
    }
}

/// Local input `block_minutes` after `start`, or `None` when `start` does
/// not parse.
pub fn end_after(start: &str, offset: &FixedOffset, block_minutes: u32) -> Option<String> {
    let start_at = parse_local_input(start, offset)?;
    let end_at = start_at + Duration::minutes(i64::from(block_minutes));
    Some(to_local_input(&end_at, offset))
}

/// Start must fall on a whole hour and the window must split evenly into
/// blocks of `block_minutes`.
pub fn validate_block_alignment(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    block_minutes: u32,
) -> Result<(), AvailabilityError> {
    if block_minutes == 0 {
        return Err(AvailabilityError::InvalidBlockDuration);
    }
    if start.minute() != 0 || start.second() != 0 {
        return Err(AvailabilityError::StartNotAligned);
    }
    let minutes = (end - start).num_minutes();
    if minutes % i64::from(block_minutes) != 0 {
        return Err(AvailabilityError::DurationNotMultiple { block_minutes });
    }
    Ok(())
}

pub fn plan_blocks(start: DateTime<Utc>, end: DateTime<Utc>, block_minutes: u32) -> Vec<PlannedBlock> {
    let mut blocks = Vec::new();
    if block_minutes == 0 {
        return blocks;
    }

    let step = Duration::minutes(i64::from(block_minutes));
    let mut current = start;
    let mut block_number = 1;
    while current < end {
        let block_end = current + step;
        blocks.push(PlannedBlock {
            block_number,
            start_at: current,
            end_at: block_end,
        });
        current = block_end;
        block_number += 1;
    }
    blocks
}

pub fn overlaps(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    other_start: DateTime<Utc>,
    other_end: DateTime<Utc>,
) -> bool {
    start < other_end && other_start < end
}

pub fn find_overlap<'a>(
    existing: &'a [Availability],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    skip_id: Option<i64>,
) -> Option<&'a Availability> {
    existing
        .iter()
        .filter(|slot| Some(slot.id) != skip_id)
        .find(|slot| overlaps(start, end, slot.start_at, slot.end_at))
}

/// Checks a draft against a doctor's existing availability before it is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityPlanner {
    block_minutes: u32,
}

impl AvailabilityPlanner {
    pub fn new(block_minutes: u32) -> Self {
        Self { block_minutes }
    }

    pub fn block_minutes(&self) -> u32 {
        self.block_minutes
    }

    pub fn check(
        &self,
        draft: &AvailabilityDraft,
        existing: &[Availability],
    ) -> Result<Vec<PlannedBlock>, AvailabilityError> {
        if let Some(conflict) = find_overlap(existing, draft.start_at, draft.end_at, None) {
            debug!("Draft overlaps availability {}", conflict.id);
            return Err(AvailabilityError::Overlap {
                availability_id: conflict.id,
            });
        }
        validate_block_alignment(draft.start_at, draft.end_at, self.block_minutes)?;
        Ok(plan_blocks(draft.start_at, draft.end_at, self.block_minutes))
    }

    /// Moving an existing window only has to avoid the others.
    pub fn check_move(
        &self,
        availability_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        existing: &[Availability],
    ) -> Result<(), AvailabilityError> {
        match find_overlap(existing, start, end, Some(availability_id)) {
            Some(conflict) => Err(AvailabilityError::Overlap {
                availability_id: conflict.id,
            }),
            None => Ok(()),
        }
    }
}

impl Default for AvailabilityPlanner {
    fn default() -> Self {
        Self::from(&BlockDurationConfig::default())
    }
}

impl From<&BlockDurationConfig> for AvailabilityPlanner {
    fn from(config: &BlockDurationConfig) -> Self {
        Self::new(config.block_duration_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn utc(value: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(value).unwrap().with_timezone(&Utc)
    }

    fn buenos_aires() -> FixedOffset {
        FixedOffset::west_opt(3 * 3600).unwrap()
    }

    fn availability(id: i64, start: &str, end: &str) -> Availability {
        Availability {
            id,
            doctor_id: 4,
            start_at: utc(start),
            end_at: utc(end),
            slots: 1,
            blocks: Vec::new(),
        }
    }

    #[test]
    fn slots_stay_within_bounds() {
        assert_eq!(clamp_slots(1, 1), Some(2));
        assert_eq!(clamp_slots(4, 1), None);
        assert_eq!(clamp_slots(1, -1), None);
        assert_eq!(clamp_slots(3, -5), Some(1));
        assert_eq!(clamp_slots(2, 10), Some(4));
    }

    #[test]
    fn default_range_starts_at_next_hour() {
        let form = AvailabilityForm::default_range(utc("2025-10-14T13:47:12Z"), &buenos_aires());
        assert_eq!(form.start, "2025-10-14T11:00");
        assert_eq!(form.end, "2025-10-14T11:30");
        assert_eq!(form.slots, 1);
    }

    #[test]
    fn default_range_spans_one_block() {
        let now = utc("2025-10-14T13:47:12Z");
        let form = AvailabilityForm::default_range_for(now, &buenos_aires(), 60);
        assert_eq!(form.start, "2025-10-14T11:00");
        assert_eq!(form.end, "2025-10-14T12:00");

        let draft = form.submit(&buenos_aires()).unwrap();
        assert!(validate_block_alignment(draft.start_at, draft.end_at, 60).is_ok());
    }

    #[test]
    fn end_follows_start_by_one_block() {
        assert_eq!(
            end_after("2025-10-14T23:00", &buenos_aires(), 90).as_deref(),
            Some("2025-10-15T00:30")
        );
        assert_eq!(end_after("mañana", &buenos_aires(), 60), None);
    }

    #[test]
    fn form_converts_local_time_to_utc() {
        let form = AvailabilityForm {
            start: "2025-10-14T09:00".into(),
            end: "2025-10-14T12:00".into(),
            slots: 2,
        };
        let draft = form.submit(&buenos_aires()).unwrap();
        assert_eq!(draft.start_at, utc("2025-10-14T12:00:00Z"));
        assert_eq!(draft.end_at, utc("2025-10-14T15:00:00Z"));
        assert_eq!(draft.slots, 2);
        assert_eq!(draft.into_request(4).slots, Some(2));
    }

    #[test]
    fn form_errors() {
        let offset = buenos_aires();
        let mut form = AvailabilityForm {
            start: String::new(),
            end: "2025-10-14T10:00".into(),
            slots: 1,
        };
        assert_eq!(form.submit(&offset), Err(AvailabilityError::MissingFields));

        form.start = "2025-10-14T09:00".into();
        form.slots = 5;
        assert_eq!(form.submit(&offset), Err(AvailabilityError::MissingFields));

        form.slots = 1;
        form.end = "mañana".into();
        assert_eq!(form.submit(&offset), Err(AvailabilityError::InvalidDates));

        form.end = "2025-10-14T09:00".into();
        assert_eq!(form.submit(&offset), Err(AvailabilityError::EndBeforeStart));
        assert_eq!(
            AvailabilityError::EndBeforeStart.to_string(),
            "La hora de fin debe ser posterior a la de inicio."
        );
    }

    #[test]
    fn alignment_rules() {
        let start = utc("2025-10-14T12:00:00Z");
        assert!(validate_block_alignment(start, start + Duration::minutes(90), 30).is_ok());
        assert_eq!(
            validate_block_alignment(start, start + Duration::minutes(90), 60),
            Err(AvailabilityError::DurationNotMultiple { block_minutes: 60 })
        );
        assert_eq!(
            validate_block_alignment(start + Duration::minutes(15), start + Duration::minutes(75), 60),
            Err(AvailabilityError::StartNotAligned)
        );
        assert_eq!(
            validate_block_alignment(start, start + Duration::minutes(60), 0),
            Err(AvailabilityError::InvalidBlockDuration)
        );
    }

    #[test]
    fn blocks_are_numbered_from_one() {
        let start = utc("2025-10-14T12:00:00Z");
        let blocks = plan_blocks(start, start + Duration::hours(2), 30);
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[0].block_number, 1);
        assert_eq!(blocks[3].block_number, 4);
        assert_eq!(blocks[3].start_at, utc("2025-10-14T13:30:00Z"));
        assert_eq!(blocks[3].end_at, utc("2025-10-14T14:00:00Z"));
        assert!(plan_blocks(start, start, 30).is_empty());
    }

    #[test]
    fn touching_windows_do_not_overlap() {
        let existing = vec![
            availability(1, "2025-10-14T12:00:00Z", "2025-10-14T13:00:00Z"),
            availability(2, "2025-10-14T15:00:00Z", "2025-10-14T16:00:00Z"),
        ];
        assert!(find_overlap(&existing, utc("2025-10-14T13:00:00Z"), utc("2025-10-14T15:00:00Z"), None).is_none());
        assert_eq!(
            find_overlap(&existing, utc("2025-10-14T12:30:00Z"), utc("2025-10-14T13:30:00Z"), None).map(|a| a.id),
            Some(1)
        );
        assert!(find_overlap(&existing, utc("2025-10-14T12:30:00Z"), utc("2025-10-14T13:30:00Z"), Some(1)).is_none());
    }

    #[test]
    fn planner_checks_overlap_before_alignment() {
        let planner = AvailabilityPlanner::new(60);
        let existing = vec![availability(9, "2025-10-14T12:00:00Z", "2025-10-14T14:00:00Z")];

        let clash = AvailabilityDraft {
            start_at: utc("2025-10-14T13:15:00Z"),
            end_at: utc("2025-10-14T14:15:00Z"),
            slots: 1,
        };
        assert_matches!(planner.check(&clash, &existing), Err(AvailabilityError::Overlap { availability_id: 9 }));

        let ok = AvailabilityDraft {
            start_at: utc("2025-10-14T14:00:00Z"),
            end_at: utc("2025-10-14T17:00:00Z"),
            slots: 1,
        };
        assert_eq!(planner.check(&ok, &existing).unwrap().len(), 3);

        assert!(planner
            .check_move(9, utc("2025-10-14T13:00:00Z"), utc("2025-10-14T15:00:00Z"), &existing)
            .is_ok());
    }

    #[test]
    fn planner_defaults_to_an_hour() {
        assert_eq!(AvailabilityPlanner::default().block_minutes(), 60);
    }
}
