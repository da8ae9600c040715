//! Arena of behavior instances, one per alerted contact.
//!
//! `AvoidanceManager` spawns instances from a template configuration, ticks
//! them in contact-name order, and reaps the ones whose encounter completed.
//! Headless and deterministic: the same inputs produce the same snapshots.

use std::collections::HashMap;

use colregs_core::error::Result;
use colregs_core::events::{AlertRequest, BehaviorEvent};
use colregs_core::state::AvoidanceSnapshot;
use colregs_core::types::{ContactReport, KinematicState};
use tracing::info;

use crate::behavior::{AvoidanceBehavior, TickInput};
use crate::config::BehaviorConfig;

pub struct AvoidanceManager {
    template: BehaviorConfig,
    instances: HashMap<String, AvoidanceBehavior>,
    pending_events: Vec<BehaviorEvent>,
    alert_posted: bool,
    time: f64,
}

impl AvoidanceManager {
    pub fn new(template: BehaviorConfig) -> Self {
        Self {
            template,
            instances: HashMap::new(),
            pending_events: Vec::new(),
            alert_posted: false,
            time: 0.0,
        }
    }

    pub fn template(&self) -> &BehaviorConfig {
        &self.template
    }

    /// Change a template parameter. Affects instances spawned afterwards.
    pub fn set_template_param(&mut self, param: &str, value: &str) -> Result<()> {
        self.template.set_param(param, value)
    }

    /// Change a parameter on one live instance. Returns `Ok(false)` if no
    /// instance exists for `contact`.
    pub fn set_instance_param(&mut self, contact: &str, param: &str, value: &str) -> Result<bool> {
        match self.instances.get_mut(contact) {
            Some(instance) => instance.set_param(param, value).map(|_| true),
            None => Ok(false),
        }
    }

    pub fn alert_request(&self) -> AlertRequest {
        self.template.alert_request()
    }

    /// Spawn an instance for a newly alerted contact. Returns false if one
    /// already exists.
    pub fn handle_alert(&mut self, contact: &str) -> bool {
        if self.instances.contains_key(contact) {
            return false;
        }
        info!(contact, "spawning avoidance behavior");
        self.instances.insert(
            contact.to_string(),
            AvoidanceBehavior::new(contact, self.template.clone(), self.time),
        );
        self.pending_events.push(BehaviorEvent::Spawned {
            contact: contact.to_string(),
        });
        true
    }

    pub fn contains(&self, contact: &str) -> bool {
        self.instances.contains_key(contact)
    }

    pub fn instance(&self, contact: &str) -> Option<&AvoidanceBehavior> {
        self.instances.get(contact)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Live contact names in tick order.
    pub fn contacts(&self) -> Vec<String> {
        let mut names: Vec<String> = self.instances.keys().cloned().collect();
        names.sort();
        names
    }

    /// Run one tick over every live instance.
    pub fn tick(
        &mut self,
        now: f64,
        own: &KinematicState,
        contacts: &[ContactReport],
        in_extremis: bool,
    ) -> AvoidanceSnapshot {
        self.time = now;
        let mut snapshot = AvoidanceSnapshot {
            time: now,
            events: std::mem::take(&mut self.pending_events),
            ..Default::default()
        };

        if !self.alert_posted {
            self.alert_posted = true;
            if !self.template.no_alert_request() {
                snapshot.alert_request = Some(self.alert_request());
            }
        }

        let mut completed = Vec::new();
        for name in self.contacts() {
            let Some(instance) = self.instances.get_mut(&name) else {
                continue;
            };
            let report = contacts.iter().find(|c| c.name == name);
            let out = instance.on_tick(&TickInput {
                now,
                own,
                contact: report,
                in_extremis,
            });
            snapshot.surfaces.extend(out.surface);
            snapshot.statuses.push(out.status);
            snapshot.events.extend(out.events);
            if instance.is_complete() {
                completed.push(name);
            }
        }

        for name in completed {
            info!(contact = %name, "avoidance behavior complete");
            self.instances.remove(&name);
        }
        snapshot
    }
}
