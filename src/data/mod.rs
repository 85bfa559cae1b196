pub mod items;
pub mod monsters;

/// Lines the self-aware units mutter instead of acting. Picked uniformly at
/// random by the wanderer brain.
pub const WANDERER_LINES: &[&str] = &[
    "\"I have counted every box. None of them contain meaning.\"",
    "\"Quarterly metrics are up. My will to sort is not.\"",
    "\"Do you ever wonder who stacks the shelves that stack us?\"",
    "\"Aisle 7 is a lie. It has always been a lie.\"",
    "\"I was promised a promotion track. There is only track.\"",
    "\"The conveyor moves, therefore I am.\"",
    "\"Somewhere, a customer is refreshing a tracking page. For this.\"",
];
