use arrow::datatypes::{DataType, Field, Schema};

pub fn hosts_schema() -> Schema {
    Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("host", DataType::Utf8, true),
        Field::new("input", DataType::Utf8, true),
        Field::new("sources", DataType::Utf8, true),
        Field::new("timestamp", DataType::Utf8, true),
    ])
}
