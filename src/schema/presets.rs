//! Built-in extraction schemas.
//!
//! These cover the common "watch a pile of planning videos, distill the
//! advice" runs. Anything else can be declared in a TOML file and passed to
//! `harvest --schema <path>`.

use super::{FieldSpec, FieldType, Schema};

/// Names of all built-in schemas.
pub const PRESET_NAMES: &[&str] = &["trip_tips", "park_guide"];

/// Look up a built-in schema by name.
pub fn by_name(name: &str) -> Option<Schema> {
    match name {
        "trip_tips" => Some(trip_tips()),
        "park_guide" => Some(park_guide()),
        _ => None,
    }
}

/// Flat trip-planning schema: one record of tips per video.
pub fn trip_tips() -> Schema {
    Schema::new(
        "trip_tips",
        vec![
            FieldSpec::new(
                "park_updates",
                FieldType::Text,
                false,
                "Recent updates or changes to the parks.",
            ),
            FieldSpec::new(
                "best_time_to_visit",
                FieldType::Text,
                false,
                "Recommendations for the best time to visit.",
            ),
            FieldSpec::new(
                "must_do_attractions",
                FieldType::TextList,
                true,
                "List of must-do attractions or rides.",
            ),
            FieldSpec::new(
                "dining_recommendations",
                FieldType::TextList,
                true,
                "Recommendations for dining options.",
            ),
            FieldSpec::new(
                "premium_tips",
                FieldType::Text,
                false,
                "Tips and tricks for using premium services like Genie+ and Lightning Lane.",
            ),
            FieldSpec::new(
                "budget_tips",
                FieldType::Text,
                false,
                "Tips for saving money and sticking to a budget.",
            ),
            FieldSpec::new(
                "packing_essentials",
                FieldType::TextList,
                true,
                "Essential items to pack for the trip.",
            ),
            FieldSpec::new(
                "transportation_options",
                FieldType::Text,
                false,
                "Information on transportation options.",
            ),
            FieldSpec::new(
                "planning_resources",
                FieldType::TextList,
                false,
                "Useful resources for planning the trip.",
            ),
        ],
    )
}

/// Nested park-guide schema: attractions and dining as structured records.
pub fn park_guide() -> Schema {
    let attraction = Schema::new(
        "attraction",
        vec![
            FieldSpec::new("name", FieldType::Text, true, "Name of the attraction."),
            FieldSpec::new(
                "description",
                FieldType::Text,
                false,
                "A brief description of the attraction.",
            ),
        ],
    );

    let dining_option = Schema::new(
        "dining_option",
        vec![
            FieldSpec::new("name", FieldType::Text, true, "Name of the dining option."),
            FieldSpec::new("cuisine", FieldType::Text, false, "Type of cuisine offered."),
            FieldSpec::new(
                "price_range",
                FieldType::Text,
                false,
                "Approximate price range.",
            ),
        ],
    );

    Schema::new(
        "park_guide",
        vec![
            FieldSpec::new(
                "park_name",
                FieldType::Text,
                true,
                "Name of the park covered by the video.",
            ),
            FieldSpec::new(
                "attractions",
                FieldType::RecordList(attraction),
                true,
                "Attractions covered in the video.",
            ),
            FieldSpec::new(
                "dining_options",
                FieldType::RecordList(dining_option),
                false,
                "Dining options covered in the video.",
            ),
            FieldSpec::new(
                "tips",
                FieldType::Record(Schema::new(
                    "park_tips",
                    vec![
                        FieldSpec::new(
                            "best_time_to_visit",
                            FieldType::Text,
                            false,
                            "Recommendations for the best time to visit the park.",
                        ),
                        FieldSpec::new(
                            "budget_tips",
                            FieldType::Text,
                            false,
                            "Tips for saving money while visiting the park.",
                        ),
                        FieldSpec::new(
                            "packing_essentials",
                            FieldType::TextList,
                            false,
                            "Essential items to pack for a trip to the park.",
                        ),
                    ],
                )),
                false,
                "Useful tips for visitors to this park.",
            ),
        ],
    )
}
