use crate::common::*;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    #[doc = "Converts a calamine cell; dates become ISO-like text, errors keep their display form"]
    pub fn from_calamine(cell: &calamine::Data) -> CellValue {
        match cell {
            calamine::Data::Empty => CellValue::Empty,
            calamine::Data::Int(v) => CellValue::Number(*v as f64),
            calamine::Data::Float(v) => CellValue::Number(*v),
            calamine::Data::Bool(v) => CellValue::Bool(*v),
            calamine::Data::String(v) => CellValue::from_text(v),
            calamine::Data::DateTime(dt) => match dt.as_datetime() {
                Some(naive) => CellValue::Text(naive.to_string()),
                None => CellValue::Number(dt.as_f64()),
            },
            other => CellValue::Text(other.to_string()),
        }
    }

    #[doc = "Converts a raw CSV field, inferring numbers the way a spreadsheet would"]
    pub fn from_csv_field(field: &str) -> CellValue {
        let trimmed: &str = field.trim();

        if trimmed.is_empty() {
            return CellValue::Empty;
        }

        match trimmed.parse::<f64>() {
            Ok(number) if number.is_finite() => CellValue::Number(number),
            _ => CellValue::Text(trimmed.to_string()),
        }
    }

    fn from_text(text: &str) -> CellValue {
        if text.trim().is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(text.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    #[doc = "Label form used for headers and chart categories: `3.0` shows as `3`"]
    pub fn to_label(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(text) => text.trim().to_string(),
            CellValue::Number(number) => format_number_label(*number),
            CellValue::Bool(flag) => flag.to_string(),
        }
    }

    #[doc = "Numeric form used for chart magnitudes; booleans count as 1/0"]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Empty => None,
            CellValue::Number(number) => Some(*number),
            CellValue::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
            CellValue::Text(text) => text
                .trim()
                .replace(',', "")
                .parse::<f64>()
                .ok()
                .filter(|number| number.is_finite()),
        }
    }
}

fn format_number_label(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}
