use crate::calc::compare::{is_same, is_same_timestamp};
use crate::calc::engine::DateEngine;
use crate::data::locale::Locale;
use crate::state::mode::PanelMode;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueShape {
    #[default]
    Single,
    Range,
    Multiple,
}

impl ValueShape {
    /// Number of input fields (and active indexes) the shape uses.
    pub fn field_count(self) -> usize {
        match self {
            ValueShape::Range => 2,
            ValueShape::Single | ValueShape::Multiple => 1,
        }
    }
}

/// Which end of a range a calendar change touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeSlot {
    Start,
    End,
}

impl RangeSlot {
    pub fn from_index(index: usize) -> Self {
        if index == 0 { RangeSlot::Start } else { RangeSlot::End }
    }
}

/// A picker's value. An absent range endpoint is an "empty endpoint".
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PickerValue<D> {
    Single(Option<D>),
    Range([Option<D>; 2]),
    Multiple(Vec<D>),
}

impl<D: Clone> PickerValue<D> {
    pub fn empty(shape: ValueShape) -> Self {
        match shape {
            ValueShape::Single => PickerValue::Single(None),
            ValueShape::Range => PickerValue::Range([None, None]),
            ValueShape::Multiple => PickerValue::Multiple(Vec::new()),
        }
    }

    pub fn shape(&self) -> ValueShape {
        match self {
            PickerValue::Single(_) => ValueShape::Single,
            PickerValue::Range(_) => ValueShape::Range,
            PickerValue::Multiple(_) => ValueShape::Multiple,
        }
    }

    pub fn get(&self, index: usize) -> Option<&D> {
        match self {
            PickerValue::Single(date) if index == 0 => date.as_ref(),
            PickerValue::Single(_) => None,
            PickerValue::Range(pair) => pair.get(index).and_then(Option::as_ref),
            PickerValue::Multiple(list) => list.get(index),
        }
    }

    /// Copy with one slot replaced; other slots are untouched. For multiple
    /// values `None` removes the entry and an index past the end appends.
    pub fn with_slot(&self, index: usize, date: Option<D>) -> Self {
        let mut next = self.clone();
        match &mut next {
            PickerValue::Single(slot) => {
                if index == 0 {
                    *slot = date;
                }
            }
            PickerValue::Range(pair) => {
                if let Some(slot) = pair.get_mut(index) {
                    *slot = date;
                }
            }
            PickerValue::Multiple(list) => match date {
                Some(d) if index < list.len() => list[index] = d,
                Some(d) => list.push(d),
                None if index < list.len() => {
                    list.remove(index);
                }
                None => {}
            },
        }
        next
    }

    pub fn slots(&self) -> Vec<Option<&D>> {
        match self {
            PickerValue::Single(date) => vec![date.as_ref()],
            PickerValue::Range([start, end]) => vec![start.as_ref(), end.as_ref()],
            PickerValue::Multiple(list) => list.iter().map(Some).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slots().iter().all(Option::is_none)
    }

    /// Reshapes a value; missing slots become empty, extra ones are dropped.
    pub fn into_shape(self, shape: ValueShape) -> Self {
        if self.shape() == shape {
            return self;
        }
        let mut dates = self.into_slots().into_iter();
        match shape {
            ValueShape::Single => PickerValue::Single(dates.next().flatten()),
            ValueShape::Range => {
                let start = dates.next().flatten();
                let end = dates.next().flatten();
                PickerValue::Range([start, end])
            }
            ValueShape::Multiple => PickerValue::Multiple(dates.flatten().collect()),
        }
    }

    fn into_slots(self) -> Vec<Option<D>> {
        match self {
            PickerValue::Single(date) => vec![date],
            PickerValue::Range([start, end]) => vec![start, end],
            PickerValue::Multiple(list) => list.into_iter().map(Some).collect(),
        }
    }
}

/// Slot-wise timestamp equality.
pub fn is_same_value<E: DateEngine>(
    engine: &E,
    a: &PickerValue<E::Date>,
    b: &PickerValue<E::Date>,
) -> bool {
    let (a, b) = (a.slots(), b.slots());
    a.len() == b.len()
        && a.iter()
            .zip(b.iter())
            .all(|(x, y)| is_same_timestamp(engine, *x, *y))
}

/// For a range change, the end that moved: `Start` unless the start is
/// unchanged.
pub fn changed_range<E: DateEngine>(
    engine: &E,
    prev: &PickerValue<E::Date>,
    next: &PickerValue<E::Date>,
) -> Option<RangeSlot> {
    if next.shape() != ValueShape::Range {
        return None;
    }
    if is_same_timestamp(engine, prev.get(0), next.get(0)) {
        Some(RangeSlot::End)
    } else {
        Some(RangeSlot::Start)
    }
}

/// Adds `date` to `list`, or removes the entry equal to it at `mode`
/// granularity.
pub fn toggle_date<E: DateEngine>(
    engine: &E,
    list: &[E::Date],
    date: E::Date,
    mode: PanelMode,
) -> Vec<E::Date> {
    let mut next = list.to_vec();
    match next.iter().position(|d| is_same(engine, d, &date, mode)) {
        Some(index) => {
            next.remove(index);
        }
        None => next.push(date),
    }
    next
}

/// The format list of one picker: the first pattern formats, all of them
/// are tried when parsing typed text.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldFormat {
    locale: String,
    patterns: Vec<String>,
}

impl FieldFormat {
    pub fn new(locale: &str, patterns: Vec<String>) -> Self {
        FieldFormat {
            locale: locale.to_string(),
            patterns,
        }
    }

    /// Custom patterns win; otherwise the locale's field format for the
    /// internal picker granularity.
    pub fn for_picker(locale: &Locale, internal_picker: PanelMode, custom: &[String]) -> Self {
        let patterns = if custom.is_empty() {
            vec![locale.field_format(internal_picker).to_string()]
        } else {
            custom.to_vec()
        };
        FieldFormat::new(&locale.locale, patterns)
    }

    pub fn primary(&self) -> &str {
        self.patterns.first().map(String::as_str).unwrap_or_default()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn format<E: DateEngine>(&self, engine: &E, date: &E::Date) -> String {
        engine.format(&self.locale, date, self.primary())
    }

    /// One string per slot; empty endpoints format as "".
    pub fn format_value<E: DateEngine>(&self, engine: &E, value: &PickerValue<E::Date>) -> Vec<String> {
        value
            .slots()
            .into_iter()
            .map(|slot| slot.map(|d| self.format(engine, d)).unwrap_or_default())
            .collect()
    }

    pub fn parse<E: DateEngine>(&self, engine: &E, text: &str) -> Option<E::Date> {
        engine.parse(&self.locale, text, &self.patterns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::chrono_engine::ChronoEngine;
    use chrono::{NaiveDate, NaiveDateTime};

    fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_with_slot_leaves_other_slot() {
        let value = PickerValue::Range([Some(dt(2025, 1, 1)), Some(dt(2025, 1, 9))]);
        let next = value.with_slot(1, None);
        assert_eq!(next, PickerValue::Range([Some(dt(2025, 1, 1)), None]));
        assert_eq!(value.get(1), Some(&dt(2025, 1, 9)));
    }

    #[test]
    fn test_with_slot_single_ignores_second_index() {
        let value: PickerValue<NaiveDateTime> = PickerValue::Single(None);
        assert_eq!(value.with_slot(1, Some(dt(2025, 1, 1))), PickerValue::Single(None));
        assert_eq!(
            value.with_slot(0, Some(dt(2025, 1, 1))),
            PickerValue::Single(Some(dt(2025, 1, 1)))
        );
    }

    #[test]
    fn test_with_slot_multiple_append_and_remove() {
        let value = PickerValue::Multiple(vec![dt(2025, 1, 1)]);
        let appended = value.with_slot(5, Some(dt(2025, 1, 2)));
        assert_eq!(appended, PickerValue::Multiple(vec![dt(2025, 1, 1), dt(2025, 1, 2)]));
        assert_eq!(appended.with_slot(0, None), PickerValue::Multiple(vec![dt(2025, 1, 2)]));
    }

    #[test]
    fn test_into_shape_fills_missing_slots() {
        let single = PickerValue::Single(Some(dt(2025, 1, 1)));
        assert_eq!(
            single.into_shape(ValueShape::Range),
            PickerValue::Range([Some(dt(2025, 1, 1)), None])
        );
        let range = PickerValue::Range([None, Some(dt(2025, 1, 2))]);
        assert_eq!(range.into_shape(ValueShape::Multiple), PickerValue::Multiple(vec![dt(2025, 1, 2)]));
    }

    #[test]
    fn test_is_empty() {
        assert!(PickerValue::<NaiveDateTime>::empty(ValueShape::Range).is_empty());
        assert!(!PickerValue::Range([None, Some(dt(2025, 1, 2))]).is_empty());
    }

    #[test]
    fn test_is_same_value_by_timestamp() {
        let engine = ChronoEngine::new();
        let a = PickerValue::Range([Some(dt(2025, 1, 1)), None]);
        let b = PickerValue::Range([Some(dt(2025, 1, 1)), None]);
        let c = PickerValue::Range([Some(dt(2025, 1, 1)), Some(dt(2025, 1, 1))]);
        assert!(is_same_value(&engine, &a, &b));
        assert!(!is_same_value(&engine, &a, &c));
    }

    #[test]
    fn test_changed_range_reports_end_when_start_same() {
        let engine = ChronoEngine::new();
        let prev = PickerValue::Range([Some(dt(2025, 1, 1)), None]);
        let next = PickerValue::Range([Some(dt(2025, 1, 1)), Some(dt(2025, 1, 5))]);
        assert_eq!(changed_range(&engine, &prev, &next), Some(RangeSlot::End));
        let moved = PickerValue::Range([Some(dt(2025, 1, 2)), None]);
        assert_eq!(changed_range(&engine, &prev, &moved), Some(RangeSlot::Start));
        let single = PickerValue::Single(Some(dt(2025, 1, 2)));
        assert_eq!(changed_range(&engine, &single, &single), None);
    }

    #[test]
    fn test_toggle_date_adds_then_removes() {
        let engine = ChronoEngine::new();
        let once = toggle_date(&engine, &[], dt(2025, 1, 1), PanelMode::Date);
        assert_eq!(once, vec![dt(2025, 1, 1)]);
        let twice = toggle_date(&engine, &once, dt(2025, 1, 1), PanelMode::Date);
        assert!(twice.is_empty());
    }

    #[test]
    fn test_toggle_month_granularity() {
        let engine = ChronoEngine::new();
        let list = vec![dt(2025, 3, 1)];
        assert!(toggle_date(&engine, &list, dt(2025, 3, 20), PanelMode::Month).is_empty());
    }

    #[test]
    fn test_format_value_range_keeps_both_strings() {
        let engine = ChronoEngine::new();
        let fmt = FieldFormat::new("en_US", vec!["%Y-%m-%d".to_string()]);
        let value = PickerValue::Range([None, Some(dt(2025, 1, 2))]);
        assert_eq!(fmt.format_value(&engine, &value), vec!["".to_string(), "2025-01-02".to_string()]);
    }

    #[test]
    fn test_for_picker_uses_locale_default() {
        let locale = Locale::en_us();
        let fmt = FieldFormat::for_picker(&locale, PanelMode::Month, &[]);
        assert_eq!(fmt.primary(), "%Y-%m");
        let custom = FieldFormat::for_picker(&locale, PanelMode::Month, &["%m/%Y".to_string()]);
        assert_eq!(custom.primary(), "%m/%Y");
    }

    #[test]
    fn test_parse_uses_all_patterns() {
        let engine = ChronoEngine::new();
        let fmt = FieldFormat::new("en_US", vec!["%Y-%m-%d".to_string(), "%Y%m%d".to_string()]);
        assert_eq!(fmt.parse(&engine, "20250102"), Some(dt(2025, 1, 2)));
    }

    #[test]
    fn test_serialize_untagged() {
        let value = PickerValue::Range([Some(dt(2025, 1, 2)), None]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"["2025-01-02T00:00:00",null]"#);
    }
}
