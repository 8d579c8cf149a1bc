//! Trainer Operations - the SimpleTrainer INI layout
//!
//! ```text
//! [Player]
//! Teleport=0
//! x=0
//! y=0
//! z=0
//! [1]
//! x=12.5
//! ...
//! Dynamic=1
//! ```
//!
//! Only props exist in this format. Lines end in CRLF.

use super::{PersistenceError, PersistenceResult};
use crate::entity::{EntityCategory, EntityDescriptor, EntityPayload, Map, PropData};
use crate::transform;
use glam::{Quat, Vec3};
use rustc_hash::FxHashMap;
use std::fmt::Write;

const PLAYER_SECTION: &str = "[Player]";

/// Keys every object section must carry
const REQUIRED_KEYS: [&str; 10] = ["x", "y", "z", "h", "Model", "qx", "qy", "qz", "qw", "Dynamic"];

// ============================================================================
// WRITING
// ============================================================================

/// Render the props of a map. Everything else is dropped.
pub fn render_trainer(map: &Map) -> String {
    let mut out = String::from("[Player]\r\nTeleport=0\r\nx=0\r\ny=0\r\nz=0\r\n");

    let props = map
        .placed_objects()
        .filter(|o| o.category() == EntityCategory::Prop);

    for (index, prop) in props.enumerate() {
        let q = transform::unsigned_zero_quat(prop.orientation);
        let p = transform::unsigned_zero_vec(prop.position);
        // Writing into a String cannot fail
        let _ = write!(
            out,
            "[{}]\r\nx={}\r\ny={}\r\nz={}\r\nh={}\r\nModel={}\r\nqx={}\r\nqy={}\r\nqz={}\r\nqw={}\r\noffz=0\r\nDynamic={}\r\n",
            index + 1,
            p.x,
            p.y,
            p.z,
            prop.rotation().z,
            prop.model_hash,
            q.x,
            q.y,
            q.z,
            q.w,
            if prop.dynamic { 1 } else { 0 },
        );
    }

    out
}

// ============================================================================
// READING
// ============================================================================

/// Key/value pairs gathered for one section
struct Section {
    header_line: usize,
    /// `[Player]` carries no object
    reserved: bool,
    values: FxHashMap<String, (String, usize)>,
}

impl Section {
    fn new(header_line: usize, reserved: bool) -> Self {
        Self {
            header_line,
            reserved,
            values: FxHashMap::default(),
        }
    }

    fn raw(&self, key: &str) -> PersistenceResult<(&str, usize)> {
        self.values
            .get(key)
            .map(|(value, line)| (value.as_str(), *line))
            .ok_or_else(|| PersistenceError::MalformedFile {
                line: self.header_line,
                reason: format!("section is missing required key '{}'", key),
            })
    }

    fn float(&self, key: &str) -> PersistenceResult<f32> {
        let (value, line) = self.raw(key)?;
        value
            .parse::<f32>()
            .map_err(|e| PersistenceError::MalformedFile {
                line,
                reason: format!("'{}' is not a number for key '{}': {}", value, key, e),
            })
    }

    fn int(&self, key: &str) -> PersistenceResult<i32> {
        let (value, line) = self.raw(key)?;
        value
            .parse::<i32>()
            .map_err(|e| PersistenceError::MalformedFile {
                line,
                reason: format!("'{}' is not an integer for key '{}': {}", value, key, e),
            })
    }

    fn into_prop(self) -> PersistenceResult<EntityDescriptor> {
        for key in REQUIRED_KEYS {
            self.raw(key)?;
        }

        let position = Vec3::new(self.float("x")?, self.float("y")?, self.float("z")?);
        let heading = self.float("h")?;
        let stored = Quat::from_xyzw(
            self.float("qx")?,
            self.float("qy")?,
            self.float("qz")?,
            self.float("qw")?,
        );
        let orientation = if transform::is_unset_orientation(stored) {
            transform::heading_to_orientation(heading)
        } else {
            stored
        };

        Ok(EntityDescriptor {
            position,
            orientation,
            model_hash: self.int("Model")?,
            dynamic: self.int("Dynamic")? == 1,
            identifier: None,
            payload: EntityPayload::Prop(PropData::default()),
        })
    }
}

fn flush(section: Option<Section>, map: &mut Map) -> PersistenceResult<()> {
    if let Some(section) = section {
        if !section.reserved {
            map.objects.push(section.into_prop()?);
        }
    }
    Ok(())
}

/// Parse a trainer file
///
/// `[Player]` sections carry no object and are skipped wherever they appear.
/// A header closes the previous section; the last one is closed when the
/// input ends.
///
/// # Returns
/// The props, or `MalformedFile` for a missing key, an unparsable number,
/// a repeated key or a line that is not `key=value`
pub fn parse_trainer(text: &str) -> PersistenceResult<Map> {
    let mut map = Map::new();
    let mut current: Option<Section> = None;

    for (index, raw) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            flush(current.take(), &mut map)?;
            let reserved = line.eq_ignore_ascii_case(PLAYER_SECTION);
            current = Some(Section::new(line_number, reserved));
            continue;
        }

        let Some(section) = current.as_mut() else {
            log::debug!("[Trainer] Ignoring line {} before the first section", line_number);
            continue;
        };
        if section.reserved {
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| PersistenceError::MalformedFile {
                line: line_number,
                reason: format!("expected key=value, found '{}'", line),
            })?;
        let key = key.trim();
        if section
            .values
            .insert(key.to_string(), (value.trim().to_string(), line_number))
            .is_some()
        {
            return Err(PersistenceError::MalformedFile {
                line: line_number,
                reason: format!("key '{}' repeated in section", key),
            });
        }
    }

    flush(current, &mut map)?;
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Marker, MarkerType};

    fn section(body: &str) -> String {
        format!("[Player]\r\nTeleport=0\r\nx=0\r\ny=0\r\nz=0\r\n{}", body)
    }

    const PROP: &str = "[1]\r\nx=1.5\r\ny=2\r\nz=3\r\nh=90\r\nModel=-42\r\nqx=0\r\nqy=0\r\nqz=0.70710677\r\nqw=0.70710677\r\noffz=0\r\nDynamic=0\r\n";

    #[test]
    fn test_only_props_survive() {
        let mut map = Map::new();
        map.objects
            .push(EntityDescriptor::prop(1, Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, 30.0)));
        map.objects.push(EntityDescriptor::vehicle(2, Vec3::ONE, 10.0));
        map.objects.push(EntityDescriptor::ped(3, Vec3::ONE, 10.0));
        map.markers.push(Marker::new(MarkerType::DebugSphere, Vec3::ONE));

        let loaded = parse_trainer(&render_trainer(&map)).expect("parses");
        assert_eq!(loaded.objects.len(), 1);
        let prop = &loaded.objects[0];
        assert_eq!(prop.category(), EntityCategory::Prop);
        assert_eq!(prop.model_hash, 1);
        assert_eq!(prop.position, Vec3::new(1.0, 2.0, 3.0));
        assert!(prop.dynamic);
        assert!((prop.heading() - 30.0).abs() < 1e-3);
        assert!(loaded.markers.is_empty());
    }

    #[test]
    fn test_layout() {
        let mut map = Map::new();
        map.objects.push(EntityDescriptor::prop(7, Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO).with_dynamic(false));
        map.objects.push(EntityDescriptor::prop(8, Vec3::ZERO, Vec3::ZERO));

        let text = render_trainer(&map);
        assert_eq!(
            text,
            "[Player]\r\nTeleport=0\r\nx=0\r\ny=0\r\nz=0\r\n[1]\r\nx=1\r\ny=2\r\nz=3\r\nh=0\r\nModel=7\r\nqx=0\r\nqy=0\r\nqz=0\r\nqw=1\r\noffz=0\r\nDynamic=0\r\n"
        );
    }

    #[test]
    fn test_last_section_is_flushed() {
        let text = section(&format!("{}{}", PROP, PROP.replace("[1]", "[2]")));
        let map = parse_trainer(&text).expect("parses");
        assert_eq!(map.objects.len(), 2);
        assert!(!map.objects[1].dynamic);
        assert_eq!(map.objects[1].model_hash, -42);
    }

    #[test]
    fn test_player_only_file_is_empty() {
        let map = parse_trainer(&section("")).expect("parses");
        assert!(map.objects.is_empty());
        assert!(parse_trainer("").expect("parses").objects.is_empty());
    }

    #[test]
    fn test_missing_key() {
        let text = section(&PROP.replace("Model=-42\r\n", ""));
        match parse_trainer(&text) {
            Err(PersistenceError::MalformedFile { line, reason }) => {
                assert_eq!(line, 6);
                assert!(reason.contains("Model"));
            }
            other => panic!("expected malformed file, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_number() {
        let text = section(&PROP.replace("y=2", "y=two"));
        assert!(matches!(
            parse_trainer(&text),
            Err(PersistenceError::MalformedFile { line: 8, .. })
        ));
    }

    #[test]
    fn test_duplicate_key_and_garbage_line() {
        let duplicated = section(&PROP.replace("z=3\r\n", "z=3\r\nz=4\r\n"));
        assert!(matches!(
            parse_trainer(&duplicated),
            Err(PersistenceError::MalformedFile { line: 10, .. })
        ));

        let garbage = section(&PROP.replace("offz=0", "offz"));
        assert!(parse_trainer(&garbage).is_err());
    }

    #[test]
    fn test_file_without_player_section_keeps_first_prop() {
        let first = PROP.replace("Model=-42", "Model=11");
        let second = PROP.replace("[1]", "[2]").replace("Model=-42", "Model=22");
        let text = format!("{}{}", first, second);
        let map = parse_trainer(&text).expect("parses");
        let models: Vec<i32> = map.objects.iter().map(|o| o.model_hash).collect();
        assert_eq!(models, vec![11, 22]);
    }

    #[test]
    fn test_player_section_after_props_is_skipped() {
        let text = format!("{}[Player]\r\nTeleport=1\r\n", PROP);
        let map = parse_trainer(&text).expect("parses");
        assert_eq!(map.objects.len(), 1);
    }

    #[test]
    fn test_negative_zero_is_never_written() {
        let mut prop = EntityDescriptor::prop(5, Vec3::new(-0.0, 1.0, 2.0), Vec3::ZERO);
        prop.orientation = Quat::from_xyzw(-0.0, 0.0, -0.0, 1.0);
        let mut map = Map::new();
        map.objects.push(prop);

        let text = render_trainer(&map);
        assert!(!text.contains("-0\r\n"), "{}", text);
        assert!(text.contains("x=0\r\ny=1\r\nz=2\r\n"));
        assert!(text.contains("qx=0\r\n"));
    }

    #[test]
    fn test_zero_quaternion_falls_back_to_heading() {
        let text = section(&PROP.replace("qz=0.70710677", "qz=0").replace("qw=0.70710677", "qw=0"));
        let map = parse_trainer(&text).expect("parses");
        assert!((map.objects[0].heading() - 90.0).abs() < 1e-3);
    }
}
