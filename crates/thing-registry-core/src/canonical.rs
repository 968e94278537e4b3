//! Canonical signing messages.
//!
//! Every transaction is signed over a single byte string built by joining
//! its fields with [`DELIMITER`] in a fixed, kind-specific order:
//!
//! | kind                | message                                              |
//! |---------------------|------------------------------------------------------|
//! | register registrant | `name:data`                                          |
//! | register thing      | `registrantName[:alias]*:data:specName`              |
//! | register spec       | `specName:registrantName:data`                       |
//!
//! No escaping is performed. A field containing `:` is legal: the message is
//! never parsed back, only re-derived from the same fields and compared.
//!
//! **CRITICAL**: These layouts are FROZEN. Changing one invalidates every
//! signature clients have already produced.

/// Field separator.
pub const DELIMITER: u8 = b':';

/// Message signed by a new registrant over its own registration.
pub fn registrant_message(name: &str, data: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(name.len() + data.len() + 1);
    buf.extend_from_slice(name.as_bytes());
    push_field(&mut buf, data);
    buf
}

/// Message signed by a registrant over a thing registration.
///
/// Aliases appear in declared order, so reordering them changes the message.
pub fn thing_message<S: AsRef<str>>(
    registrant_name: &str,
    aliases: &[S],
    data: &str,
    spec_name: &str,
) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(registrant_name.as_bytes());
    for alias in aliases {
        push_field(&mut buf, alias.as_ref());
    }
    push_field(&mut buf, data);
    push_field(&mut buf, spec_name);
    buf
}

/// Message signed by a registrant over a spec registration.
pub fn spec_message(spec_name: &str, registrant_name: &str, data: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(spec_name.len() + registrant_name.len() + data.len() + 2);
    buf.extend_from_slice(spec_name.as_bytes());
    push_field(&mut buf, registrant_name);
    push_field(&mut buf, data);
    buf
}

fn push_field(buf: &mut Vec<u8>, field: &str) {
    buf.push(DELIMITER);
    buf.extend_from_slice(field.as_bytes());
}
