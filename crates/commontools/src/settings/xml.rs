//! `app.config` → flat settings keys.
//!
//! The root element is not part of any key. Nested element names form the
//! key path, a `name` attribute adds one more segment, other attributes
//! become `path:attribute` keys and element text becomes the value at the
//! element's path:
//!
//! ```xml
//! <configuration>
//!   <ConnectionStrings>
//!     <DefaultConnection>Server=db</DefaultConnection>   <!-- ConnectionStrings:DefaultConnection -->
//!   </ConnectionStrings>
//!   <Service name="api" timeout="30" />                 <!-- Service:api:timeout -->
//! </configuration>
//! ```
//!
//! Classic `<connectionStrings><add name=".." connectionString=".."/>`
//! entries are also exposed as `ConnectionStrings:<name>`.

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};

use super::{CONNECTION_STRINGS_SECTION, Settings, join_key};

/// An open element: its key path and the text collected so far.
struct Frame {
    path: String,
    text: String,
}

pub(super) fn parse(contents: &str) -> Result<Settings, String> {
    let mut settings = Settings::default();
    if contents.trim().is_empty() {
        return Ok(settings);
    }

    let mut reader = Reader::from_str(contents);
    let mut buf = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut saw_root = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if stack.is_empty() {
                    check_single_root(&mut saw_root)?;
                }
                let frame = open_element(e, stack.last(), &mut settings)?;
                stack.push(frame);
            }
            Ok(Event::Empty(ref e)) => {
                if stack.is_empty() {
                    check_single_root(&mut saw_root)?;
                }
                open_element(e, stack.last(), &mut settings)?;
            }
            Ok(Event::Text(ref e)) => {
                if let Some(frame) = stack.last_mut() {
                    let text = e.decode().map_err(|err| err.to_string())?;
                    frame.text.push_str(&text);
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Ok(Event::GeneralRef(ref e)) => {
                if let Some(frame) = stack.last_mut() {
                    if let Some(c) = e.resolve_char_ref().map_err(|err| err.to_string())? {
                        frame.text.push(c);
                    } else {
                        let name = String::from_utf8_lossy(e);
                        let resolved = resolve_predefined_entity(&name)
                            .ok_or_else(|| format!("unknown entity reference &{name};"))?;
                        frame.text.push_str(resolved);
                    }
                }
            }
            Ok(Event::End(_)) => {
                if let Some(frame) = stack.pop() {
                    let text = frame.text.trim();
                    if !text.is_empty() && !frame.path.is_empty() {
                        set(&mut settings, frame.path, text.to_string());
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "malformed XML near byte {}: {e}",
                    reader.buffer_position()
                ));
            }
            _ => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err("unexpected end of file: unclosed element".to_string());
    }
    if !saw_root {
        return Err("no root element".to_string());
    }
    Ok(settings)
}

fn check_single_root(saw_root: &mut bool) -> Result<(), String> {
    if *saw_root {
        return Err("multiple root elements".to_string());
    }
    *saw_root = true;
    Ok(())
}

/// Record an element's attributes and return the frame for its content.
fn open_element(
    e: &BytesStart,
    parent: Option<&Frame>,
    settings: &mut Settings,
) -> Result<Frame, String> {
    let attrs = collect_attrs(e)?;
    let name_attr = attrs
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("name"))
        .map(|(_, v)| v.as_str());

    let path = match parent {
        // Root element: contributes no segment, and `name` is a plain attribute
        None => String::new(),
        Some(parent) => {
            let element = String::from_utf8_lossy(e.name().as_ref()).to_string();
            let path = join_key(&parent.path, &element);
            match name_attr {
                Some(name) => join_key(&path, name),
                None => path,
            }
        }
    };

    for (key, value) in &attrs {
        if key.starts_with("xmlns") || (parent.is_some() && key.eq_ignore_ascii_case("name")) {
            continue;
        }
        set(settings, join_key(&path, key), value.clone());
    }

    if let Some(parent) = parent
        && parent.path.eq_ignore_ascii_case(CONNECTION_STRINGS_SECTION)
        && e.name().as_ref().eq_ignore_ascii_case(b"add")
        && let Some(name) = name_attr
        && let Some((_, conn)) = attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("connectionString"))
    {
        set(
            settings,
            join_key(CONNECTION_STRINGS_SECTION, name),
            conn.clone(),
        );
    }

    Ok(Frame {
        path,
        text: String::new(),
    })
}

fn set(settings: &mut Settings, key: String, value: String) {
    if settings.insert(key.as_str(), value).is_some() {
        log::warn!("setting {key} is defined more than once, keeping the last value");
    }
}

/// Collect attributes as `(name, unescaped value)` pairs.
fn collect_attrs(e: &BytesStart) -> Result<Vec<(String, String)>, String> {
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| err.to_string())?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr.unescape_value().map_err(|err| err.to_string())?;
        attrs.push((key, value.into_owned()));
    }
    Ok(attrs)
}
