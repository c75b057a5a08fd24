use crate::common::*;

use crate::errors::viewer_error::*;

#[doc = "Category labels and values in table row order, one chart point per row"]
#[derive(Debug, Clone, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct ChartSeries {
    category_title: String,
    value_title: String,
    categories: Vec<String>,
    values: Vec<f64>,
}

impl ChartSeries {
    pub fn new(
        category_title: String,
        value_title: String,
        categories: Vec<String>,
        values: Vec<f64>,
    ) -> Result<Self, ViewerError> {
        if categories.len() != values.len() {
            return Err(ViewerError::LengthMismatch {
                categories: categories.len(),
                values: values.len(),
            });
        }

        Ok(ChartSeries {
            category_title,
            value_title,
            categories,
            values,
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (&String, f64)> + '_ {
        self.categories.iter().zip(self.values.iter().copied())
    }
}
