//! Attendance Sessions
//!
//! A class session with its roster, a countdown fed by tick events and the
//! materials shared during the class.

pub mod ticker;

pub use ticker::Ticker;

use tokio::sync::mpsc;

use crate::core::{AttendanceRecord, FieldError};
use crate::stats::{self, AttendanceStats};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionStatus {
    Pending,
    Active,
    Completed,
}

/// Inputs to [`AttendanceSession::apply`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionEvent {
    Start,
    /// Seconds elapsed since the session started
    Tick(u64),
    Toggle(String),
    End,
}

/// A file shared with the class
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClassMaterial {
    pub id: String,
    pub name: String,
    pub content_type: &'static str,
}

#[derive(Clone, Debug)]
pub struct AttendanceSession {
    subject: String,
    duration_secs: u64,
    elapsed_secs: u64,
    status: SessionStatus,
    records: Vec<AttendanceRecord>,
    materials: Vec<ClassMaterial>,
}

impl AttendanceSession {
    /// New pending session over a caller-supplied roster
    pub fn new(
        subject: impl Into<String>,
        duration_secs: u64,
        records: Vec<AttendanceRecord>,
    ) -> Self {
        Self {
            subject: subject.into(),
            duration_secs,
            elapsed_secs: 0,
            status: SessionStatus::Pending,
            records,
            materials: Vec::new(),
        }
    }

    /// Apply one event; returns whether anything changed
    pub fn apply(&mut self, event: SessionEvent) -> bool {
        match event {
            SessionEvent::Start => {
                if self.status != SessionStatus::Pending {
                    return false;
                }
                log::info!("session '{}' started", self.subject);
                self.status = SessionStatus::Active;
                true
            }
            SessionEvent::Tick(elapsed) => {
                // Late or duplicate ticks never move the clock backwards
                if self.status != SessionStatus::Active || elapsed <= self.elapsed_secs {
                    return false;
                }
                self.elapsed_secs = elapsed;
                true
            }
            SessionEvent::Toggle(id) => self.toggle(&id).is_some(),
            SessionEvent::End => {
                if self.status == SessionStatus::Completed {
                    return false;
                }
                log::info!(
                    "session '{}' ended after {} with {}% attendance",
                    self.subject,
                    stats::format_duration(self.elapsed_secs),
                    self.stats().percentage
                );
                self.status = SessionStatus::Completed;
                true
            }
        }
    }

    pub fn start(&mut self) -> bool {
        self.apply(SessionEvent::Start)
    }

    pub fn on_tick(&mut self, elapsed_secs: u64) -> bool {
        self.apply(SessionEvent::Tick(elapsed_secs))
    }

    /// End the session; further ticks are ignored
    pub fn stop(&mut self) -> bool {
        self.apply(SessionEvent::End)
    }

    /// Flip a student's present flag, returning the new value
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let record = self.records.iter_mut().find(|r| r.id == id)?;
        Some(record.toggle())
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn materials(&self) -> &[ClassMaterial] {
        &self.materials
    }

    pub fn stats(&self) -> AttendanceStats {
        stats::attendance_stats(&self.records)
    }

    pub fn elapsed_time(&self) -> String {
        stats::format_duration(self.elapsed_secs)
    }

    pub fn remaining_time(&self) -> String {
        stats::remaining_time(self.elapsed_secs, self.duration_secs)
    }

    pub fn is_time_up(&self) -> bool {
        self.elapsed_secs >= self.duration_secs
    }

    /// Attach a file, shown under `display_name` when one is given
    ///
    /// A blank `file_name` means nothing was picked and is rejected.
    pub fn add_material(
        &mut self,
        file_name: &str,
        display_name: Option<&str>,
    ) -> Result<&ClassMaterial, FieldError> {
        if file_name.trim().is_empty() {
            return Err(FieldError::RequiredFieldMissing(
                "Por favor selecciona un archivo primero.".to_string(),
            ));
        }

        let name = display_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(file_name);
        let material = ClassMaterial {
            id: (self.materials.len() + 1).to_string(),
            name: name.to_string(),
            content_type: content_type_for(file_name),
        };
        log::debug!("session '{}': material '{}' added", self.subject, material.name);
        self.materials.push(material);
        Ok(&self.materials[self.materials.len() - 1])
    }

    /// Start the session together with its one-second ticker
    ///
    /// Ticks count from this call, so the countdown starts at zero. Returns
    /// `None` when the session was already started.
    pub fn start_ticking(
        &mut self,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Option<Ticker> {
        if !self.start() {
            return None;
        }
        Some(Ticker::every_second(events))
    }

    /// Feed events from a channel until the session completes, the time is
    /// up, or every sender is gone
    pub async fn drive(&mut self, events: &mut mpsc::UnboundedReceiver<SessionEvent>) {
        while let Some(event) = events.recv().await {
            self.apply(event);
            if self.status == SessionStatus::Completed || self.is_time_up() {
                break;
            }
        }
    }
}

/// MIME type guessed from a file extension
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => "application/pdf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "doc" => "application/msword",
        _ => "application/octet-stream",
    }
}
