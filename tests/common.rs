#![cfg(feature = "std")]

mod support;

use std::io::Cursor;

use csv::ReaderBuilder;
use sprocket::{
    avec::{FromRecord, FromRecords},
    sans::DecodedField,
};
use support::activity;

/// Published records of the activity document, one per line: the message
/// number, then pairs of field number and value. The compressed time offset is
/// given under the field `time`.
const ACTIVITY: &str = "\
0,0,activity,1,garmin,2,edge1000,3,12345
20,253,1000,3,120,2,20,78,20
20,time,10,253,1002
21,0,front_gear_change,3,838999043,11,3,12,28,9,2,10,50
78,0,1||2
";

#[test]
fn decode_slice_activity() {
    let mut validator = Validator::new(ACTIVITY);
    sprocket::avec::decode_slice(&activity().build(), &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_reader_activity() {
    let mut validator = Validator::new(ACTIVITY);
    sprocket::avec::decode_reader(&mut Cursor::new(activity().build()), &mut validator).unwrap();
    validator.finish();
}

struct Validator(Vec<String>, Vec<Vec<String>>);

impl Validator {
    fn new(expected: &str) -> Self {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_reader(expected.as_bytes());

        let expected: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
            .collect();

        Self(vec![], expected)
    }

    fn validate(&mut self, field: impl ToString, value: impl ToString) {
        assert_eq!(self.0.remove(0), field.to_string());
        assert_eq!(self.0.remove(0), value.to_string());
    }

    fn finish(&self) {
        assert!(self.0.is_empty(), "unpublished fields: {:?}", self.0);
        assert!(self.1.is_empty(), "unpublished records: {:?}", self.1);
    }
}

impl FromRecords for Validator {
    fn add_record(&mut self, number: u16, _: Option<&str>) -> Option<&mut dyn FromRecord> {
        assert!(self.0.is_empty(), "unpublished fields: {:?}", self.0);
        self.0 = self.1.remove(0);
        assert_eq!(self.0.remove(0), number.to_string());
        Some(self)
    }
}

impl FromRecord for Validator {
    fn add_time_offset(&mut self, offset: u8) {
        self.validate("time", offset);
    }

    fn add_field(&mut self, field: &DecodedField) {
        self.validate(field.number(), field.value().unwrap());
    }

    fn add_developer_field(&mut self, field: &DecodedField) {
        self.validate(field.number(), field.value().unwrap());
    }
}
