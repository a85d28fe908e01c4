//! Enumerated type tables of the bundled profile.

use super::TypeProfile;

pub(super) static TYPES: &[TypeProfile] = &[
    TypeProfile {
        name: "file",
        values: &[
            (1, "device"),
            (2, "settings"),
            (3, "sport"),
            (4, "activity"),
            (5, "workout"),
            (6, "course"),
            (7, "schedules"),
            (9, "weight"),
            (10, "totals"),
            (11, "goals"),
            (14, "blood_pressure"),
            (15, "monitoring_a"),
            (20, "activity_summary"),
            (28, "monitoring_daily"),
            (32, "monitoring_b"),
            (34, "segment"),
            (35, "segment_list"),
            (40, "exd_configuration"),
            (0xF7, "mfg_range_min"),
            (0xFE, "mfg_range_max"),
        ],
    },
    TypeProfile {
        name: "manufacturer",
        values: &[
            (1, "garmin"),
            (13, "dynastream_oem"),
            (15, "dynastream"),
            (23, "suunto"),
            (32, "wahoo_fitness"),
            (69, "stages_cycling"),
            (89, "tacx"),
            (123, "polar_electro"),
            (255, "development"),
            (260, "zwift"),
            (263, "favero_electronics"),
        ],
    },
    TypeProfile {
        name: "garmin_product",
        values: &[
            (1, "hrm1"),
            (2, "axh01"),
            (3, "axb01"),
            (4, "axb02"),
            (5, "hrm2ss"),
            (6, "dsi_alf02"),
            (1036, "edge500"),
            (1169, "edge800"),
            (1836, "edge1000"),
            (10007, "sdm4"),
            (10014, "edge_remote"),
            (20119, "training_center"),
            (65534, "connect"),
        ],
    },
    TypeProfile {
        name: "sport",
        values: &[
            (0, "generic"),
            (1, "running"),
            (2, "cycling"),
            (3, "transition"),
            (4, "fitness_equipment"),
            (5, "swimming"),
            (6, "basketball"),
            (7, "soccer"),
            (8, "tennis"),
            (9, "american_football"),
            (10, "training"),
            (11, "walking"),
            (12, "cross_country_skiing"),
            (13, "alpine_skiing"),
            (14, "snowboarding"),
            (15, "rowing"),
            (16, "mountaineering"),
            (17, "hiking"),
            (18, "multisport"),
            (19, "paddling"),
            (254, "all"),
        ],
    },
    TypeProfile {
        name: "event",
        values: &[
            (0, "timer"),
            (3, "workout"),
            (4, "workout_step"),
            (5, "power_down"),
            (6, "power_up"),
            (7, "off_course"),
            (8, "session"),
            (9, "lap"),
            (10, "course_point"),
            (11, "battery"),
            (12, "virtual_partner_pace"),
            (13, "hr_high_alert"),
            (14, "hr_low_alert"),
            (15, "speed_high_alert"),
            (16, "speed_low_alert"),
            (17, "cad_high_alert"),
            (18, "cad_low_alert"),
            (19, "power_high_alert"),
            (20, "power_low_alert"),
            (21, "recovery_hr"),
            (22, "battery_low"),
            (23, "time_duration_alert"),
            (24, "distance_duration_alert"),
            (25, "calorie_duration_alert"),
            (26, "activity"),
            (27, "fitness_equipment"),
            (28, "length"),
            (32, "user_marker"),
            (33, "sport_point"),
            (36, "calibration"),
            (42, "front_gear_change"),
            (43, "rear_gear_change"),
            (44, "rider_position_change"),
            (45, "elev_high_alert"),
            (46, "elev_low_alert"),
            (47, "comm_timeout"),
        ],
    },
    TypeProfile {
        name: "event_type",
        values: &[
            (0, "start"),
            (1, "stop"),
            (2, "consecutive_depreciated"),
            (3, "marker"),
            (4, "stop_all"),
            (5, "begin_depreciated"),
            (6, "end_depreciated"),
            (7, "end_all_depreciated"),
            (8, "stop_disable"),
            (9, "stop_disable_all"),
        ],
    },
    TypeProfile {
        name: "timer_trigger",
        values: &[(0, "manual"), (1, "auto"), (2, "fitness_equipment")],
    },
    TypeProfile {
        name: "activity",
        values: &[(0, "manual"), (1, "auto_multi_sport")],
    },
    TypeProfile {
        name: "battery_status",
        values: &[
            (1, "new"),
            (2, "good"),
            (3, "ok"),
            (4, "low"),
            (5, "critical"),
            (6, "charging"),
            (7, "unknown"),
        ],
    },
    TypeProfile {
        name: "rider_position_type",
        values: &[
            (0, "seated"),
            (1, "standing"),
            (2, "transition_to_seated"),
            (3, "transition_to_standing"),
        ],
    },
    TypeProfile {
        name: "fit_base_type",
        values: &[
            (0x00, "enum"),
            (0x01, "sint8"),
            (0x02, "uint8"),
            (0x83, "sint16"),
            (0x84, "uint16"),
            (0x85, "sint32"),
            (0x86, "uint32"),
            (0x07, "string"),
            (0x88, "float32"),
            (0x89, "float64"),
            (0x0A, "uint8z"),
            (0x8B, "uint16z"),
            (0x8C, "uint32z"),
            (0x0D, "byte"),
            (0x8E, "sint64"),
            (0x8F, "uint64"),
            (0x90, "uint64z"),
        ],
    },
];
