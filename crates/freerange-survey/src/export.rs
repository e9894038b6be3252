use crate::{record::Record, scoring};

/// Orders records for export: ascending composite `years_above_mean`,
/// absent scores last, ties in input order.
pub fn sort_for_export(records: &mut [Record]) {
    records.sort_by(|a, b| scoring::cmp_absent_last(a.years_above_mean, b.years_above_mean));
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::{area::Area, question::QuestionId, record::Highlight};

    fn with_years(years: &[Option<f64>]) -> Vec<Record> {
        years
            .iter()
            .enumerate()
            .map(|(i, y)| {
                let mut record = Record::empty(i + 1);
                record.years_above_mean = *y;
                record
            })
            .collect()
    }

    #[test]
    fn test_sort_is_stable_with_absent_last() {
        let mut records = with_years(&[None, Some(1.0), Some(-2.0), Some(1.0), None, Some(0.0)]);
        sort_for_export(&mut records);
        let rows = records.iter().map(|r| r.row).collect::<Vec<_>>();
        assert_eq!(rows, vec![3, 6, 2, 4, 1, 5]);
    }

    #[test]
    fn test_exported_record_has_every_answer_field() {
        let mut record = Record::empty(4);
        record.current_area = Some(Area::InnerSuburb);
        record.highlight = Some(Highlight::MostCautious);
        record.answer_mut(QuestionId::School).typical = Some(0.0);

        let json = serde_json::to_value([&record]).unwrap();
        let object = &json[0];
        assert_eq!(object["row"], 4);
        assert_eq!(object["caution"], Value::Null);
        assert_eq!(object["highlight"], "most_cautious");
        assert_eq!(object["current_area"]["code"], 3);
        assert_eq!(object["current_area"]["label"], "inner suburb");
        assert_eq!(object["childhood_area"], Value::Null);

        let answers = object["answers"].as_object().unwrap();
        assert_eq!(answers.len(), QuestionId::LEN);
        for question in QuestionId::ALL {
            let answer = answers[question.slug()].as_object().unwrap();
            for field in ["typical", "mature", "immature", "zscore", "years_above_mean"] {
                assert!(answer.contains_key(field), "{question} lacks {field}");
            }
        }
        assert_eq!(answers["school"]["typical"], 0.0);
        assert_eq!(answers["bike"]["typical"], Value::Null);
        assert_ne!(answers["school"]["typical"], answers["bike"]["typical"]);
    }
}
