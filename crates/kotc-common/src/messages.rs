//! Message templates for rejected insertions.
//!
//! Templates use `{0}`, `{1}`, ... placeholders that are filled by
//! [`format_message`]. Keeping the wording in one table means the exact error
//! contract can be asserted against in tests without string duplication.

/// A message definition with a stable code and its template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MessageTemplate {
    pub code: u32,
    pub message: &'static str,
}

/// `Cannot add element of type '{0}' to {1}[{2}]`
pub const CANNOT_ADD_ELEMENT: MessageTemplate = MessageTemplate {
    code: 1001,
    message: "Cannot add element of type '{0}' to {1}[{2}]",
};

/// `Cannot add element of type '{0}' to {1} {2}[{3}]` (map keys and values)
pub const CANNOT_ADD_MAP_ENTRY: MessageTemplate = MessageTemplate {
    code: 1002,
    message: "Cannot add element of type '{0}' to {1} {2}[{3}]",
};

pub const ALL_MESSAGES: &[MessageTemplate] = &[
    CANNOT_ADD_ELEMENT,
    CANNOT_ADD_MAP_ENTRY,
];

/// Format a message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// Look up a message template by code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    ALL_MESSAGES.iter().find(|m| m.code == code).map(|m| m.message)
}

impl MessageTemplate {
    /// Fill this template's placeholders.
    #[must_use]
    pub fn format(&self, args: &[&str]) -> String {
        format_message(self.message, args)
    }
}
