//! Session Operations - placing, saving, loading and resetting maps
//!
//! The session is the boundary between user actions and the core. Errors from
//! `save`/`load` propagate to the caller; `save_reported`/`load_reported` log
//! them and hand back a `Notice` so nothing escapes into the frame loop.

use super::session_data::{EditorSession, LoadReport, Notice};
use crate::catalog::{self, InvalidHashList, ModelCatalog};
use crate::config::EditorConfig;
use crate::constants;
use crate::entity::{EntityDescriptor, EntityPayload, Map, MapMetadata, Marker};
use crate::error::{EditorError, EditorResult};
use crate::host::{ModelLoader, ModelRef, WorldHost};
use crate::persistence::{self, Format};
use crate::registry::{self, RegistryData};
use crate::transform;
use chrono::{DateTime, Utc};
use glam::Vec3;
use std::path::{Path, PathBuf};

impl<H: WorldHost + ModelLoader> EditorSession<H> {
    /// Session with an empty catalog and an in-memory invalid hash list
    pub fn new(host: H, config: EditorConfig, now: DateTime<Utc>) -> Self {
        Self {
            host,
            registry: RegistryData::from_config(&config),
            markers: Vec::new(),
            removed_from_world: Vec::new(),
            metadata: MapMetadata::default(),
            catalog: ModelCatalog::default(),
            invalid_hashes: InvalidHashList::in_memory(),
            config,
            marker_counter: 0,
            loaded_entities: 0,
            changes_made: 0,
            last_autosave: now,
        }
    }

    /// Session backed by the catalog and invalid hash files named in the config
    pub fn open(host: H, config: EditorConfig, now: DateTime<Utc>) -> EditorResult<Self> {
        config.validate()?;
        let catalog = catalog::load_catalog(&config, &host)?;
        let invalid_hashes = InvalidHashList::load(&config.invalid_hash_path)?;
        log::info!(
            "[Session] Opened with {} known invalid models",
            invalid_hashes.len()
        );

        let mut session = Self::new(host, config, now);
        session.catalog = catalog;
        session.invalid_hashes = invalid_hashes;
        Ok(session)
    }

    fn resolve(&mut self, hash: i32) -> EditorResult<ModelRef> {
        catalog::resolve_model(
            &mut self.invalid_hashes,
            &mut self.host,
            hash,
            self.config.model_load_attempts,
        )
    }

    // ========================================================================
    // EDITING
    // ========================================================================

    pub fn place_prop(
        &mut self,
        hash: i32,
        position: Vec3,
        rotation: Vec3,
        dynamic: bool,
    ) -> EditorResult<crate::entity::Handle> {
        let model = self.resolve(hash)?;
        let handle = registry::create_prop(
            &mut self.registry,
            &mut self.host,
            model,
            position,
            rotation,
            dynamic,
            None,
        )?;
        self.changes_made += 1;
        Ok(handle)
    }

    pub fn place_vehicle(
        &mut self,
        hash: i32,
        position: Vec3,
        heading: f32,
        dynamic: bool,
    ) -> EditorResult<crate::entity::Handle> {
        let model = self.resolve(hash)?;
        let handle = registry::create_vehicle(
            &mut self.registry,
            &mut self.host,
            model,
            position,
            heading,
            dynamic,
            None,
        )?;
        self.changes_made += 1;
        Ok(handle)
    }

    /// Place a ped with the default action, relationship and weapon
    pub fn place_ped(
        &mut self,
        hash: i32,
        position: Vec3,
        heading: f32,
        dynamic: bool,
    ) -> EditorResult<crate::entity::Handle> {
        let model = self.resolve(hash)?;
        let handle = registry::create_ped(
            &mut self.registry,
            &mut self.host,
            model,
            position,
            heading,
            dynamic,
            None,
        )?;
        registry::populate_ped_defaults(&mut self.registry, &mut self.host, handle)?;
        self.changes_made += 1;
        Ok(handle)
    }

    /// Place a pickup. Pickup hashes name pickup types, not streamed models.
    pub fn place_pickup(
        &mut self,
        hash: i32,
        position: Vec3,
        heading: f32,
        amount: i32,
        respawn_timer: i32,
        dynamic: bool,
    ) -> EditorResult<crate::entity::Handle> {
        let handle = registry::create_pickup(
            &mut self.registry,
            &mut self.host,
            ModelRef::resolved(hash),
            position,
            heading,
            amount,
            respawn_timer,
            dynamic,
        )?;
        self.changes_made += 1;
        Ok(handle)
    }

    pub fn delete_entity(&mut self, handle: crate::entity::Handle) -> bool {
        let removed = registry::remove_entity(&mut self.registry, &mut self.host, handle);
        if removed {
            self.changes_made += 1;
        }
        removed
    }

    /// Add a marker and return the id it was given
    pub fn add_marker(&mut self, mut marker: Marker) -> i32 {
        self.marker_counter += 1;
        marker.id = self.marker_counter;
        self.markers.push(marker);
        self.changes_made += 1;
        self.marker_counter
    }

    pub fn remove_marker(&mut self, id: i32) -> bool {
        let before = self.markers.len();
        self.markers.retain(|m| m.id != id);
        let removed = self.markers.len() != before;
        if removed {
            self.changes_made += 1;
        }
        removed
    }

    /// Delete an object that belongs to the world, remembering it so the
    /// deletion is saved with the map and undone by `new_map`.
    /// Editor-owned handles are simply deleted.
    pub fn remove_world_object(&mut self, handle: crate::entity::Handle) -> EditorResult<()> {
        if self.registry.contains(handle) {
            self.delete_entity(handle);
            return Ok(());
        }

        let (Some(model), Some(position), Some(orientation)) = (
            self.host.model_of(handle),
            self.host.position(handle),
            self.host.orientation(handle),
        ) else {
            return Err(EditorError::UnknownHandle(handle));
        };

        let mut descriptor = EntityDescriptor::prop(model, position, Vec3::ZERO);
        descriptor.orientation = orientation;
        self.removed_from_world.push(descriptor);
        self.host.delete(handle);
        self.changes_made += 1;
        log::debug!("[Session] Removed world object {} (model {})", handle, model);
        Ok(())
    }

    // ========================================================================
    // SNAPSHOT / SAVE
    // ========================================================================

    /// Current state as a map
    pub fn snapshot(&self) -> Map {
        Map {
            objects: registry::get_all_entities(&self.registry, &self.host),
            removed_from_world: self.removed_from_world.clone(),
            markers: self.markers.clone(),
            metadata: self.metadata.clone(),
        }
    }

    fn write_map(&mut self, path: &Path, format: Format) -> EditorResult<PathBuf> {
        let path = persistence::path_with_extension(path, format);
        let map = self.snapshot();
        persistence::save_map(&path, &map, format, &self.catalog)?;
        self.changes_made = 0;
        Ok(path)
    }

    /// Save the current map. The format's extension is appended when missing.
    pub fn save(&mut self, path: &Path, format: Format) -> EditorResult<PathBuf> {
        let path = self.write_map(path, format)?;
        if format.supports_loading() {
            self.metadata.filename = Some(path.clone());
        }
        Ok(path)
    }

    pub fn save_reported(&mut self, path: &Path, format: Format) -> Notice {
        match self.save(path, format) {
            Ok(saved) => Notice::info(format!("Saved current map as {}.", saved.display())),
            Err(e) => {
                log::error!("[Session] Map failed to save: {}", e);
                Notice::error(format!("Map failed to save: {}", e))
            }
        }
    }

    // ========================================================================
    // LOAD
    // ========================================================================

    /// Spawn one loaded descriptor with all its side metadata
    fn spawn_descriptor(
        &mut self,
        descriptor: &EntityDescriptor,
        report: &mut LoadReport,
    ) -> EditorResult<crate::entity::Handle> {
        let position = descriptor.position;
        let orientation = Some(descriptor.orientation);
        let heading = descriptor.heading();

        let handle = match &descriptor.payload {
            EntityPayload::Prop(prop) => {
                let model = self.resolve(descriptor.model_hash)?;
                let handle = registry::create_prop(
                    &mut self.registry,
                    &mut self.host,
                    model,
                    position,
                    descriptor.rotation(),
                    descriptor.dynamic,
                    orientation,
                )?;
                if prop.door {
                    registry::set_door(&mut self.registry, &mut self.host, handle, true)?;
                }
                if let Some(texture) = prop.texture {
                    registry::set_texture_variant(&mut self.registry, &mut self.host, handle, texture)?;
                }
                handle
            }
            EntityPayload::Vehicle(vehicle) => {
                let model = self.resolve(descriptor.model_hash)?;
                let handle = registry::create_vehicle(
                    &mut self.registry,
                    &mut self.host,
                    model,
                    position,
                    heading,
                    descriptor.dynamic,
                    orientation,
                )?;
                if vehicle.sirens_active {
                    registry::set_siren(&mut self.registry, &mut self.host, handle, true)?;
                }
                registry::set_vehicle_colors(
                    &mut self.registry,
                    &mut self.host,
                    handle,
                    vehicle.primary_color,
                    vehicle.secondary_color,
                )?;
                handle
            }
            EntityPayload::Ped(ped) => {
                let model = self.resolve(descriptor.model_hash)?;
                let handle = registry::create_ped(
                    &mut self.registry,
                    &mut self.host,
                    model,
                    position,
                    heading,
                    descriptor.dynamic,
                    orientation,
                )?;
                if let Some(action) = ped.action {
                    registry::set_ped_action(&mut self.registry, &mut self.host, handle, action)?;
                }
                if let Some(relationship) = ped.relationship {
                    registry::set_ped_relationship(
                        &mut self.registry,
                        &mut self.host,
                        handle,
                        relationship,
                    )?;
                }
                if let Some(weapon) = &ped.weapon {
                    registry::set_ped_weapon(&mut self.registry, &mut self.host, handle, weapon)?;
                }
                registry::populate_ped_defaults(&mut self.registry, &mut self.host, handle)?;
                handle
            }
            EntityPayload::Pickup(pickup) => registry::create_pickup(
                &mut self.registry,
                &mut self.host,
                ModelRef::resolved(descriptor.model_hash),
                position,
                heading,
                pickup.amount,
                pickup.respawn_timer,
                descriptor.dynamic,
            )?,
        };

        if let Some(identifier) = &descriptor.identifier {
            if let Err(e) = registry::set_identifier(&mut self.registry, handle, identifier) {
                log::warn!("[Session] Dropping identification of {}: {}", handle, e);
                report.rejected_identifiers += 1;
            }
        }

        Ok(handle)
    }

    /// Feed a parsed map into the session
    pub fn apply_map(&mut self, map: Map) -> LoadReport {
        let mut report = LoadReport {
            path: map.metadata.filename.clone().unwrap_or_default(),
            ..Default::default()
        };

        for descriptor in &map.objects {
            self.loaded_entities += 1;
            match self.spawn_descriptor(descriptor, &mut report) {
                Ok(_) => report.spawned += 1,
                Err(EditorError::InvalidModel { hash }) => {
                    log::warn!("[Session] Skipping object with invalid model {}", hash);
                    report.invalid_models += 1;
                }
                Err(e) => {
                    log::warn!(
                        "[Session] Skipping {} (model {}): {}",
                        descriptor.category(),
                        descriptor.model_hash,
                        e
                    );
                    report.failed += 1;
                }
            }
        }

        for removed in map.removed_from_world {
            let found = self.host.closest_object(
                removed.position,
                constants::models::REMOVED_OBJECT_SEARCH_RADIUS,
                removed.model_hash,
            );
            if let Some(handle) = found.filter(|h| !self.registry.contains(*h)) {
                self.host.delete(handle);
                report.removed_world_objects += 1;
            }
            self.removed_from_world.push(removed);
        }

        for mut marker in map.markers {
            self.marker_counter += 1;
            marker.id = self.marker_counter;
            self.markers.push(marker);
            report.markers += 1;
        }

        self.metadata = map.metadata;
        report
    }

    /// Load a map on top of the current one
    pub fn load(&mut self, path: &Path, format: Format) -> EditorResult<LoadReport> {
        let map = persistence::load_map(path, format)?;
        let report = self.apply_map(map);
        log::info!(
            "[Session] Loaded {}: {} spawned, {} skipped",
            report.path.display(),
            report.spawned,
            report.skipped()
        );
        Ok(report)
    }

    pub fn load_reported(&mut self, path: &Path, format: Format) -> Notice {
        match self.load(path, format) {
            Ok(report) if report.skipped() > 0 => Notice::info(format!(
                "Loaded map {} ({} objects could not be spawned).",
                report.path.display(),
                report.skipped()
            )),
            Ok(report) => Notice::info(format!("Loaded map {}.", report.path.display())),
            Err(e) => {
                log::error!("[Session] Map failed to load: {}", e);
                Notice::error(format!("Map failed to load: {}", e))
            }
        }
    }

    /// Load every map in the autoload directory, XML files first
    pub fn autoload(&mut self) -> Vec<Notice> {
        let dir = self.config.autoload_dir.clone();
        let Ok(entries) = std::fs::read_dir(&dir) else {
            return Vec::new();
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file())
            .collect();
        files.sort();

        let mut notices = Vec::new();
        for format in [Format::Xml, Format::SimpleTrainer] {
            for path in &files {
                let matches = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .and_then(Format::from_extension)
                    == Some(format);
                if matches {
                    notices.push(self.load_reported(path, format));
                }
            }
        }
        notices
    }

    // ========================================================================
    // RESET / AUTOSAVE
    // ========================================================================

    /// Clear the map and put deleted world objects back
    pub fn new_map(&mut self, now: DateTime<Utc>) {
        let cleared = registry::clear_all(&mut self.registry, &mut self.host);
        self.markers.clear();

        for removed in self.removed_from_world.drain(..) {
            let restored = self.host.spawn_prop(
                ModelRef::resolved(removed.model_hash),
                removed.position,
                transform::orientation_to_euler(removed.orientation),
                true,
            );
            if restored.is_none() {
                log::warn!(
                    "[Session] Could not restore world object {}",
                    removed.model_hash
                );
            }
        }

        self.metadata = MapMetadata::default();
        self.marker_counter = 0;
        self.loaded_entities = 0;
        self.changes_made = 0;
        self.last_autosave = now;
        log::info!("[Session] New map, cleared {} entities", cleared);
    }

    /// Autosave runs when the interval elapsed, something exists, something
    /// changed, and the map is not just the one that was loaded
    pub fn autosave_due(&self, now: DateTime<Utc>) -> bool {
        let Some(interval) = self.config.autosave_interval() else {
            return false;
        };
        let entities = registry::entity_count(&self.registry);

        now.signed_duration_since(self.last_autosave) >= interval
            && entities > 0
            && self.changes_made > 0
            && entities != self.loaded_entities
    }

    /// Save to the autosave file if due
    pub fn autosave(&mut self, now: DateTime<Utc>) -> Option<Notice> {
        if !self.autosave_due(now) {
            return None;
        }
        let path = self.config.autosave_path.clone();
        self.last_autosave = now;
        let notice = match self.write_map(&path, Format::Xml) {
            Ok(saved) => Notice::info(format!("Autosaved to {}.", saved.display())),
            Err(e) => {
                log::error!("[Session] Autosave failed: {}", e);
                Notice::error(format!("Autosave failed: {}", e))
            }
        };
        Some(notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{
        EntityCategory, Handle, IdleAction, MarkerType, PedData, Relationship, VehicleData,
    };
    use crate::host::HeadlessHost;
    use crate::persistence::PersistenceError;
    use chrono::Duration;

    fn start() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .expect("valid time")
            .with_timezone(&Utc)
    }

    fn session() -> EditorSession<HeadlessHost> {
        EditorSession::new(HeadlessHost::new(), EditorConfig::default(), start())
    }

    fn populated() -> EditorSession<HeadlessHost> {
        let mut s = session();
        let prop = s
            .place_prop(10, Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, 45.0), false)
            .expect("prop");
        let vehicle = s
            .place_vehicle(20, Vec3::new(5.0, 5.0, 5.0), 90.0, true)
            .expect("vehicle");
        let ped = s.place_ped(30, Vec3::new(9.0, 9.0, 9.0), 180.0, true).expect("ped");

        let (data, host) = s.parts_mut();
        registry::set_identifier(data, prop, "crate").expect("identifier");
        registry::set_siren(data, host, vehicle, true).expect("siren");
        registry::set_vehicle_colors(data, host, vehicle, 4, 5).expect("colors");
        registry::set_ped_action(data, host, ped, IdleAction::Smoke).expect("action");
        registry::set_ped_relationship(data, host, ped, Relationship::Hate).expect("rel");
        s.mark_changed();

        s.add_marker(Marker::new(MarkerType::DebugSphere, Vec3::new(4.0, 4.0, 4.0)));
        s
    }

    #[test]
    fn test_save_and_load_restores_metadata() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut source = populated();
        let saved = source.save(&dir.path().join("city"), Format::Xml).expect("saved");
        assert_eq!(saved, dir.path().join("city.xml"));
        assert_eq!(source.changes_made(), 0);

        let mut loaded = session();
        let report = loaded.load(&dir.path().join("city"), Format::Xml).expect("loaded");
        assert_eq!(report.spawned, 3);
        assert_eq!(report.markers, 1);
        assert_eq!(report.skipped(), 0);

        let before = source.snapshot();
        let after = loaded.snapshot();
        assert_eq!(after.objects.len(), 3);
        for (a, b) in before.objects.iter().zip(&after.objects) {
            assert_eq!(a.category(), b.category());
            assert_eq!(a.model_hash, b.model_hash);
            assert_eq!(a.dynamic, b.dynamic);
            assert_eq!(a.payload, b.payload);
            assert_eq!(a.identifier, b.identifier);
            assert!(transform::rotations_approx_eq(a.rotation(), b.rotation(), 1e-3));
        }

        let vehicle = &after.objects[1];
        assert_eq!(
            vehicle.payload,
            EntityPayload::Vehicle(VehicleData {
                sirens_active: true,
                primary_color: 4,
                secondary_color: 5,
            })
        );
        let EntityPayload::Ped(ped) = &after.objects[2].payload else {
            panic!("expected ped");
        };
        assert_eq!(ped.action, Some(IdleAction::Smoke));
        assert_eq!(ped.weapon.as_deref(), Some(crate::entity::UNARMED));
        assert_eq!(loaded.metadata().filename, Some(saved));
    }

    #[test]
    fn test_invalid_models_are_skipped_and_remembered() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut source = populated();
        let path = source.save(&dir.path().join("map.xml"), Format::Xml).expect("saved");

        let mut host = HeadlessHost::new();
        host.invalid_models.insert(20);
        let mut loaded = EditorSession::new(host, EditorConfig::default(), start());
        let report = loaded.load(&path, Format::Xml).expect("loaded");

        assert_eq!(report.spawned, 2);
        assert_eq!(report.invalid_models, 1);
        assert!(loaded.invalid_hashes().contains(20));
        assert_eq!(registry::count_of(loaded.registry(), EntityCategory::Vehicle), 0);
    }

    #[test]
    fn test_malformed_file_leaves_registry_untouched() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("broken.ini");
        std::fs::write(
            &path,
            "[Player]\r\nTeleport=0\r\n[1]\r\nx=1\r\ny=1\r\nz=1\r\nh=0\r\nModel=4\r\nqx=0\r\nqy=0\r\nqz=0\r\nqw=1\r\nDynamic=1\r\n[2]\r\nx=1\r\n",
        )
        .expect("written");

        let mut s = populated();
        let before = registry::entity_count(s.registry());
        let result = s.load(&path, Format::SimpleTrainer);
        assert!(matches!(
            result,
            Err(EditorError::Persistence(PersistenceError::MalformedFile { line: 14, .. }))
        ));
        assert_eq!(registry::entity_count(s.registry()), before);

        let notice = s.load_reported(&path, Format::SimpleTrainer);
        assert!(notice.is_error());
    }

    #[test]
    fn test_missing_file_notice() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut s = session();
        let notice = s.load_reported(&dir.path().join("ghost"), Format::Xml);
        assert!(notice.is_error());
        assert!(notice.message.contains("not found"));
    }

    #[test]
    fn test_markers_get_fresh_ids() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut source = populated();
        source.add_marker(Marker::new(MarkerType::Number1, Vec3::ONE));
        let path = source.save(&dir.path().join("m"), Format::Xml).expect("saved");

        let mut s = session();
        s.add_marker(Marker::new(MarkerType::Number9, Vec3::ONE));
        s.load(&path, Format::Xml).expect("loaded");
        let ids: Vec<i32> = s.markers().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        assert!(s.remove_marker(2));
        assert!(!s.remove_marker(2));
    }

    #[test]
    fn test_duplicate_identifier_on_load_is_dropped() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut source = populated();
        let path = source.save(&dir.path().join("ids"), Format::Xml).expect("saved");

        let mut s = session();
        s.load(&path, Format::Xml).expect("first load");
        let report = s.load(&path, Format::Xml).expect("second load");
        assert_eq!(report.rejected_identifiers, 1);
        assert_eq!(report.spawned, 3);
        assert_eq!(registry::entity_count(s.registry()), 6);
    }

    #[test]
    fn test_world_object_removal_and_restore() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut s = session();
        let lamp = s.host_mut().place_world_object(555, Vec3::new(7.0, 7.0, 7.0));

        s.remove_world_object(lamp).expect("removed");
        assert!(!s.host().exists(lamp));
        assert_eq!(s.removed_from_world().len(), 1);
        assert!(matches!(
            s.remove_world_object(Handle(1)),
            Err(EditorError::UnknownHandle(_))
        ));

        s.place_prop(10, Vec3::ONE, Vec3::ZERO, true).expect("prop");
        let path = s.save(&dir.path().join("removed"), Format::Xml).expect("saved");

        // Another world with the same lamp: loading deletes it
        let mut other = session();
        let twin = other.host_mut().place_world_object(555, Vec3::new(7.2, 7.0, 7.0));
        let report = other.load(&path, Format::Xml).expect("loaded");
        assert_eq!(report.removed_world_objects, 1);
        assert!(!other.host().exists(twin));

        // New map puts it back and forgets everything else
        other.new_map(start());
        assert!(other.removed_from_world().is_empty());
        assert!(other.registry().is_empty());
        assert!(other.markers().is_empty());
        assert_eq!(other.host().object_count(), 1);
        assert!(other
            .host()
            .closest_object(Vec3::new(7.0, 7.0, 7.0), 0.1, 555)
            .is_some());
    }

    #[test]
    fn test_trainer_save_keeps_only_props() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut s = populated();
        let path = s
            .save(&dir.path().join("trainer"), Format::SimpleTrainer)
            .expect("saved");
        assert_eq!(path, dir.path().join("trainer.ini"));

        let mut loaded = session();
        let report = loaded.load(&path, Format::SimpleTrainer).expect("loaded");
        assert_eq!(report.spawned, 1);
        assert_eq!(registry::prop_count(loaded.registry()), 1);
        assert!(loaded.markers().is_empty());
    }

    #[test]
    fn test_capacity_refusal_is_reported_per_object() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut s = populated();
        s.place_prop(11, Vec3::new(2.0, 2.0, 2.0), Vec3::ZERO, true).expect("second prop");
        let path = s.save(&dir.path().join("two"), Format::Xml).expect("saved");

        let config = EditorConfig {
            max_props: 1,
            ..Default::default()
        };
        let mut small = EditorSession::new(HeadlessHost::new(), config, start());
        let report = small.load(&path, Format::Xml).expect("loaded");
        assert_eq!(report.failed, 1);
        assert_eq!(registry::prop_count(small.registry()), 1);
    }

    #[test]
    fn test_autosave_conditions() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = EditorConfig::default().rooted_at(dir.path());
        let mut s = EditorSession::new(HeadlessHost::new(), config, start());
        let later = start() + Duration::minutes(6);

        // Nothing placed yet
        assert!(!s.autosave_due(later));

        s.place_prop(10, Vec3::ONE, Vec3::ZERO, true).expect("prop");
        assert!(!s.autosave_due(start() + Duration::minutes(4)));
        assert!(s.autosave_due(later));

        let notice = s.autosave(later).expect("autosaved");
        assert!(!notice.is_error());
        assert!(dir.path().join("Autosave.xml").exists());
        assert_eq!(s.metadata().filename, None);

        // Saved, so no changes left
        assert!(!s.autosave_due(later + Duration::minutes(10)));
    }

    #[test]
    fn test_autosave_skips_freshly_loaded_map() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut source = populated();
        let path = source.save(&dir.path().join("fresh"), Format::Xml).expect("saved");

        let mut s = session();
        s.load(&path, Format::Xml).expect("loaded");
        s.mark_changed();
        // Same number of entities as the file held
        assert!(!s.autosave_due(start() + Duration::minutes(30)));

        s.place_prop(10, Vec3::new(3.0, 3.0, 3.0), Vec3::ZERO, true).expect("prop");
        assert!(s.autosave_due(start() + Duration::minutes(30)));
    }

    #[test]
    fn test_disabled_autosave() {
        let config = EditorConfig {
            autosave_interval_minutes: 0,
            ..Default::default()
        };
        let mut s = EditorSession::new(HeadlessHost::new(), config, start());
        s.place_prop(10, Vec3::ONE, Vec3::ZERO, true).expect("prop");
        assert!(!s.autosave_due(start() + Duration::days(1)));
    }

    #[test]
    fn test_autoload_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = EditorConfig::default().rooted_at(dir.path());
        std::fs::create_dir_all(&config.autoload_dir).expect("dir");

        let mut source = populated();
        source
            .save(&config.autoload_dir.join("a"), Format::Xml)
            .expect("xml saved");
        source
            .save(&config.autoload_dir.join("b"), Format::SimpleTrainer)
            .expect("ini saved");
        std::fs::write(config.autoload_dir.join("notes.txt"), "ignored").expect("written");

        let mut s = EditorSession::new(HeadlessHost::new(), config, start());
        let notices = s.autoload();
        assert_eq!(notices.len(), 2);
        assert!(notices.iter().all(|n| !n.is_error()));
        assert_eq!(registry::entity_count(s.registry()), 4);
    }

    #[test]
    fn test_open_reads_catalog_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = EditorConfig::default().rooted_at(dir.path());
        std::fs::write(&config.object_list_path, "prop_crate=10\r\n").expect("written");
        std::fs::write(&config.invalid_hash_path, "99\r\n").expect("written");

        let mut s = EditorSession::open(HeadlessHost::new(), config, start()).expect("opens");
        assert_eq!(s.catalog().props.get("prop_crate"), Some(10));
        assert!(matches!(
            s.place_prop(99, Vec3::ONE, Vec3::ZERO, true),
            Err(EditorError::InvalidModel { hash: 99 })
        ));

        let raw = dir.path().join("dump");
        s.place_prop(10, Vec3::ONE, Vec3::ZERO, true).expect("prop");
        let saved = s.save(&raw, Format::Raw).expect("saved");
        let text = std::fs::read_to_string(saved).expect("read");
        assert!(text.starts_with("Prop name = prop_crate"));
    }

    #[test]
    fn test_ped_defaults_on_placement() {
        let mut s = session();
        let ped = s.place_ped(30, Vec3::ONE, 0.0, true).expect("ped");
        let record = s.registry().record(ped).expect("record");
        assert_eq!(record.payload, EntityPayload::Ped(PedData::with_defaults()));
        assert_eq!(s.host().ped_weapons.get(&ped).map(String::as_str), Some("Unarmed"));
    }
}
