// operator marker constants
pub const OPERATOR_PREFIX: char = '$';

// update operator constants
pub const SET_OPERATOR: &str = "$set";
pub const PUSH_OPERATOR: &str = "$push";
pub const PULL_OPERATOR: &str = "$pull";
pub const UPDATE_OPERATORS: [&str; 3] = [SET_OPERATOR, PUSH_OPERATOR, PULL_OPERATOR];

// Compile-time assertion for update operators count
const _: () = {
    const UPDATE_OPERATORS_COUNT: usize = 3;
    const ACTUAL_COUNT: usize = UPDATE_OPERATORS.len();
    const _: [(); 1] = [(); (ACTUAL_COUNT == UPDATE_OPERATORS_COUNT) as usize];
};

// matcher operator constants
pub const ELEM_MATCH: &str = "$elemMatch";

// scalar array elements are wrapped in a synthetic single-field document
// under this key before sub-query matching
pub const ELEMENT_FIELD: &str = "$";
