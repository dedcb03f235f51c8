pub(crate) const OPTION_PREFIX: char = '-';
pub(crate) const VALUE_SEPARATOR: char = '=';
pub(crate) const LIST_SEPARATOR: char = ' ';
pub(crate) const PATTERN_SEPARATOR: &str = ", ";

pub(crate) const LEAF_COLUMN_WIDTH: usize = 40;
pub(crate) const COMMAND_COLUMN_WIDTH: usize = 25;
pub(crate) const SECTION_INDENT: usize = 2;

pub(crate) const HELP_SWITCH: &str = "--help";
