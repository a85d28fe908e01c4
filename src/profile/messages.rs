//! Message tables of the bundled profile.

use super::{Component, FieldProfile, MessageProfile, Reference, SubField};

const fn field(number: u8, name: &'static str, kind: &'static str) -> FieldProfile {
    FieldProfile {
        number,
        name,
        kind,
        scale: 1.0,
        offset: 0.0,
        units: "",
        subfields: &[],
        components: &[],
    }
}

const fn component(field: u8, bit_offset: u8, bits: u8) -> Component {
    Component {
        field,
        bit_offset,
        bits,
        scale: 1.0,
        offset: 0.0,
        accumulate: false,
    }
}

impl FieldProfile {
    const fn scaled(self, scale: f64, offset: f64) -> Self {
        Self {
            scale,
            offset,
            ..self
        }
    }

    const fn units(self, units: &'static str) -> Self {
        Self { units, ..self }
    }

    const fn subfields(self, subfields: &'static [SubField]) -> Self {
        Self { subfields, ..self }
    }

    const fn components(self, components: &'static [Component]) -> Self {
        Self { components, ..self }
    }
}

impl Component {
    const fn scaled(self, scale: f64, offset: f64) -> Self {
        Self {
            scale,
            offset,
            ..self
        }
    }

    const fn accumulated(self) -> Self {
        Self {
            accumulate: true,
            ..self
        }
    }
}

const TIMESTAMP: FieldProfile = field(253, "timestamp", "date_time").units("s");

const FILE_ID: &[FieldProfile] = &[
    field(0, "type", "file"),
    field(1, "manufacturer", "manufacturer"),
    field(2, "product", "uint16").subfields(PRODUCT_SUBFIELDS),
    field(3, "serial_number", "uint32z"),
    field(4, "time_created", "date_time"),
    field(5, "number", "uint16"),
    field(8, "product_name", "string"),
];

// Product subfields of `file_id`, keyed on the manufacturer in field 1.
const PRODUCT_SUBFIELDS: &[SubField] = &[
    SubField {
        field: field(2, "favero_product", "uint16"),
        references: &[Reference { field: 1, value: 263 }],
    },
    SubField {
        field: field(2, "garmin_product", "garmin_product"),
        references: &[Reference { field: 1, value: 1 }],
    },
    SubField {
        field: field(2, "garmin_product", "garmin_product"),
        references: &[Reference { field: 1, value: 15 }],
    },
    SubField {
        field: field(2, "garmin_product", "garmin_product"),
        references: &[Reference { field: 1, value: 13 }],
    },
];

const DEVICE_PRODUCT_SUBFIELDS: &[SubField] = &[
    SubField {
        field: field(4, "favero_product", "uint16"),
        references: &[Reference { field: 2, value: 263 }],
    },
    SubField {
        field: field(4, "garmin_product", "garmin_product"),
        references: &[Reference { field: 2, value: 1 }],
    },
    SubField {
        field: field(4, "garmin_product", "garmin_product"),
        references: &[Reference { field: 2, value: 15 }],
    },
    SubField {
        field: field(4, "garmin_product", "garmin_product"),
        references: &[Reference { field: 2, value: 13 }],
    },
];

const SESSION: &[FieldProfile] = &[
    field(254, "message_index", "message_index"),
    TIMESTAMP,
    field(0, "event", "event"),
    field(1, "event_type", "event_type"),
    field(2, "start_time", "date_time"),
    field(5, "sport", "sport"),
    field(7, "total_elapsed_time", "uint32").scaled(1000.0, 0.0).units("s"),
    field(8, "total_timer_time", "uint32").scaled(1000.0, 0.0).units("s"),
    field(9, "total_distance", "uint32").scaled(100.0, 0.0).units("m"),
    field(11, "total_calories", "uint16").units("kcal"),
    field(14, "avg_speed", "uint16")
        .scaled(1000.0, 0.0)
        .units("m/s")
        .components(SESSION_AVG_SPEED),
    field(15, "max_speed", "uint16")
        .scaled(1000.0, 0.0)
        .units("m/s")
        .components(SESSION_MAX_SPEED),
    field(16, "avg_heart_rate", "uint8").units("bpm"),
    field(17, "max_heart_rate", "uint8").units("bpm"),
    field(20, "avg_power", "uint16").units("watts"),
    field(21, "max_power", "uint16").units("watts"),
    field(124, "enhanced_avg_speed", "uint32").scaled(1000.0, 0.0).units("m/s"),
    field(125, "enhanced_max_speed", "uint32").scaled(1000.0, 0.0).units("m/s"),
];

const SESSION_AVG_SPEED: &[Component] = &[component(124, 0, 16).scaled(1000.0, 0.0)];
const SESSION_MAX_SPEED: &[Component] = &[component(125, 0, 16).scaled(1000.0, 0.0)];

const RECORD: &[FieldProfile] = &[
    TIMESTAMP,
    field(0, "position_lat", "sint32").units("semicircles"),
    field(1, "position_long", "sint32").units("semicircles"),
    field(2, "altitude", "uint16")
        .scaled(5.0, 500.0)
        .units("m")
        .components(RECORD_ALTITUDE),
    field(3, "heart_rate", "uint8").units("bpm"),
    field(4, "cadence", "uint8").units("rpm"),
    field(5, "distance", "uint32").scaled(100.0, 0.0).units("m"),
    field(6, "speed", "uint16")
        .scaled(1000.0, 0.0)
        .units("m/s")
        .components(RECORD_SPEED),
    field(7, "power", "uint16").units("watts"),
    field(8, "compressed_speed_distance", "byte").components(RECORD_COMPRESSED_SPEED_DISTANCE),
    field(13, "temperature", "sint8").units("C"),
    field(18, "cycles", "uint8")
        .units("cycles")
        .components(RECORD_CYCLES),
    field(19, "total_cycles", "uint32").units("cycles"),
    field(28, "compressed_accumulated_power", "uint16")
        .units("watts")
        .components(RECORD_COMPRESSED_ACCUMULATED_POWER),
    field(29, "accumulated_power", "uint32").units("watts"),
    field(73, "enhanced_speed", "uint32").scaled(1000.0, 0.0).units("m/s"),
    field(78, "enhanced_altitude", "uint32").scaled(5.0, 500.0).units("m"),
];

const RECORD_ALTITUDE: &[Component] = &[component(78, 0, 16).scaled(5.0, 500.0)];
const RECORD_SPEED: &[Component] = &[component(73, 0, 16).scaled(1000.0, 0.0)];
const RECORD_COMPRESSED_SPEED_DISTANCE: &[Component] = &[
    component(6, 0, 12).scaled(100.0, 0.0),
    component(5, 12, 12).scaled(16.0, 0.0).accumulated(),
];
const RECORD_CYCLES: &[Component] = &[component(19, 0, 8).accumulated()];
const RECORD_COMPRESSED_ACCUMULATED_POWER: &[Component] = &[component(29, 0, 16).accumulated()];

const EVENT: &[FieldProfile] = &[
    TIMESTAMP,
    field(0, "event", "event"),
    field(1, "event_type", "event_type"),
    field(2, "data16", "uint16").components(EVENT_DATA16),
    field(3, "data", "uint32").subfields(EVENT_DATA_SUBFIELDS),
    field(4, "event_group", "uint8"),
    field(7, "score", "uint16"),
    field(8, "opponent_score", "uint16"),
    field(9, "front_gear_num", "uint8z"),
    field(10, "front_gear", "uint8z"),
    field(11, "rear_gear_num", "uint8z"),
    field(12, "rear_gear", "uint8z"),
];

const EVENT_DATA16: &[Component] = &[component(3, 0, 16)];

const EVENT_GEAR_CHANGE: &[Component] = &[
    component(11, 0, 8),
    component(12, 8, 8),
    component(9, 16, 8),
    component(10, 24, 8),
];

const EVENT_SPORT_POINT: &[Component] = &[component(7, 0, 16), component(8, 16, 16)];

const EVENT_DATA_SUBFIELDS: &[SubField] = &[
    SubField {
        field: field(3, "timer_trigger", "timer_trigger"),
        references: &[Reference { field: 0, value: 0 }],
    },
    SubField {
        field: field(3, "course_point_index", "message_index"),
        references: &[Reference { field: 0, value: 10 }],
    },
    SubField {
        field: field(3, "battery_level", "uint16").scaled(1000.0, 0.0).units("V"),
        references: &[Reference { field: 0, value: 11 }],
    },
    SubField {
        field: field(3, "virtual_partner_speed", "uint16")
            .scaled(1000.0, 0.0)
            .units("m/s"),
        references: &[Reference { field: 0, value: 12 }],
    },
    SubField {
        field: field(3, "hr_high_alert", "uint8").units("bpm"),
        references: &[Reference { field: 0, value: 13 }],
    },
    SubField {
        field: field(3, "hr_low_alert", "uint8").units("bpm"),
        references: &[Reference { field: 0, value: 14 }],
    },
    SubField {
        field: field(3, "speed_high_alert", "uint32")
            .scaled(1000.0, 0.0)
            .units("m/s"),
        references: &[Reference { field: 0, value: 15 }],
    },
    SubField {
        field: field(3, "speed_low_alert", "uint32")
            .scaled(1000.0, 0.0)
            .units("m/s"),
        references: &[Reference { field: 0, value: 16 }],
    },
    SubField {
        field: field(3, "cad_high_alert", "uint16").units("rpm"),
        references: &[Reference { field: 0, value: 17 }],
    },
    SubField {
        field: field(3, "cad_low_alert", "uint16").units("rpm"),
        references: &[Reference { field: 0, value: 18 }],
    },
    SubField {
        field: field(3, "power_high_alert", "uint16").units("watts"),
        references: &[Reference { field: 0, value: 19 }],
    },
    SubField {
        field: field(3, "power_low_alert", "uint16").units("watts"),
        references: &[Reference { field: 0, value: 20 }],
    },
    SubField {
        field: field(3, "time_duration_alert", "uint32")
            .scaled(1000.0, 0.0)
            .units("s"),
        references: &[Reference { field: 0, value: 23 }],
    },
    SubField {
        field: field(3, "distance_duration_alert", "uint32")
            .scaled(100.0, 0.0)
            .units("m"),
        references: &[Reference { field: 0, value: 24 }],
    },
    SubField {
        field: field(3, "calorie_duration_alert", "uint32").units("calories"),
        references: &[Reference { field: 0, value: 25 }],
    },
    SubField {
        field: field(3, "fitness_equipment_state", "fitness_equipment_state"),
        references: &[Reference { field: 0, value: 27 }],
    },
    SubField {
        field: field(3, "sport_point", "uint32").components(EVENT_SPORT_POINT),
        references: &[Reference { field: 0, value: 33 }],
    },
    SubField {
        field: field(3, "gear_change_data", "uint32").components(EVENT_GEAR_CHANGE),
        references: &[Reference { field: 0, value: 42 }],
    },
    SubField {
        field: field(3, "gear_change_data", "uint32").components(EVENT_GEAR_CHANGE),
        references: &[Reference { field: 0, value: 43 }],
    },
    SubField {
        field: field(3, "rider_position", "rider_position_type"),
        references: &[Reference { field: 0, value: 44 }],
    },
];

const DEVICE_INFO: &[FieldProfile] = &[
    TIMESTAMP,
    field(0, "device_index", "device_index"),
    field(1, "device_type", "uint8"),
    field(2, "manufacturer", "manufacturer"),
    field(3, "serial_number", "uint32z"),
    field(4, "product", "uint16").subfields(DEVICE_PRODUCT_SUBFIELDS),
    field(5, "software_version", "uint16").scaled(100.0, 0.0),
    field(6, "hardware_version", "uint8"),
    field(10, "battery_voltage", "uint16").scaled(256.0, 0.0).units("V"),
    field(11, "battery_status", "battery_status"),
    field(27, "product_name", "string"),
];

const ACTIVITY: &[FieldProfile] = &[
    TIMESTAMP,
    field(0, "total_timer_time", "uint32").scaled(1000.0, 0.0).units("s"),
    field(1, "num_sessions", "uint16"),
    field(2, "type", "activity"),
    field(3, "event", "event"),
    field(4, "event_type", "event_type"),
    field(5, "local_timestamp", "local_date_time"),
    field(6, "event_group", "uint8"),
];

const FILE_CREATOR: &[FieldProfile] = &[
    field(0, "software_version", "uint16"),
    field(1, "hardware_version", "uint8"),
];

const HRV: &[FieldProfile] = &[field(0, "time", "uint16").scaled(1000.0, 0.0).units("s")];

const FIELD_DESCRIPTION: &[FieldProfile] = &[
    field(0, "developer_data_index", "uint8"),
    field(1, "field_definition_number", "uint8"),
    field(2, "fit_base_type_id", "fit_base_type"),
    field(3, "field_name", "string"),
    field(4, "array", "uint8"),
    field(5, "components", "string"),
    field(6, "scale", "uint8"),
    field(7, "offset", "sint8"),
    field(8, "units", "string"),
    field(9, "bits", "string"),
    field(10, "accumulate", "string"),
    field(13, "fit_base_unit_id", "fit_base_unit"),
    field(14, "native_mesg_num", "mesg_num"),
    field(15, "native_field_num", "uint8"),
];

const DEVELOPER_DATA_ID: &[FieldProfile] = &[
    field(0, "developer_id", "byte"),
    field(1, "application_id", "byte"),
    field(2, "manufacturer_id", "manufacturer"),
    field(3, "developer_data_index", "uint8"),
    field(4, "application_version", "uint32"),
];

pub(super) static MESSAGES: &[MessageProfile] = &[
    MessageProfile {
        number: 0,
        name: "file_id",
        fields: FILE_ID,
    },
    MessageProfile {
        number: 18,
        name: "session",
        fields: SESSION,
    },
    MessageProfile {
        number: 20,
        name: "record",
        fields: RECORD,
    },
    MessageProfile {
        number: 21,
        name: "event",
        fields: EVENT,
    },
    MessageProfile {
        number: 23,
        name: "device_info",
        fields: DEVICE_INFO,
    },
    MessageProfile {
        number: 34,
        name: "activity",
        fields: ACTIVITY,
    },
    MessageProfile {
        number: 49,
        name: "file_creator",
        fields: FILE_CREATOR,
    },
    MessageProfile {
        number: 78,
        name: "hrv",
        fields: HRV,
    },
    MessageProfile {
        number: 206,
        name: "field_description",
        fields: FIELD_DESCRIPTION,
    },
    MessageProfile {
        number: 207,
        name: "developer_data_id",
        fields: DEVELOPER_DATA_ID,
    },
];
