// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The per-user conversation dispatch.
//!
//! `dispatch` loads the user's persisted state, runs the matching handler
//! from an exhaustive (state, event) table, persists the new state, and
//! only then sends the replies. Persistence precedes delivery: a crash
//! after the save but before the send resumes at the new state -- at worst
//! the user sees a duplicate prompt, never lost input.
//!
//! Unmatched (state, event) pairs are dropped silently: no transition, no
//! effect, no persisted write.

use std::sync::Arc;

use chrono::Utc;
use rota_config::model::RotaConfig;
use rota_core::localtime::{format_local_short, parse_local};
use rota_core::types::{Button, Event, Outbound, Queue, QueueStatus, User, UserId};
use rota_core::{Messenger, RotaError};
use rota_lifecycle::LifecycleScheduler;
use rota_storage::Database;
use rota_storage::queries::{attendants, queues, states, users};
use rota_storage::queries::attendants::JoinOutcome;
use tracing::{debug, error, warn};

use crate::pagination::paginate;
use crate::state::{BrowseState, ChatState, QueueDraft, RegDraft, SessionData, parse_state};

/// Engine policy, extracted from configuration at startup.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub super_admin_id: Option<String>,
    pub min_notify_lead_secs: i64,
    pub min_open_duration_secs: i64,
    pub utc_offset_hours: i32,
    pub page_size: usize,
}

impl EngineSettings {
    pub fn from_config(config: &RotaConfig) -> Self {
        Self {
            super_admin_id: config.bot.super_admin_id.clone(),
            min_notify_lead_secs: config.lifecycle.min_notify_lead_secs,
            min_open_duration_secs: config.lifecycle.min_open_duration_secs,
            utc_offset_hours: config.time.utc_offset_hours,
            page_size: config.pagination.page_size,
        }
    }
}

/// A handler's result: the state to persist and the replies to send after.
struct Step {
    next: ChatState,
    replies: Vec<Outbound>,
}

impl Step {
    fn to(next: ChatState, replies: Vec<Outbound>) -> Self {
        Self { next, replies }
    }

    /// Prepend messages ahead of another step's replies, keeping its state.
    fn after(lead: Vec<Outbound>, step: Step) -> Self {
        let mut replies = lead;
        replies.extend(step.replies);
        Self {
            next: step.next,
            replies,
        }
    }
}

/// The conversation session engine.
///
/// One instance serves every user; per-user event ordering is guaranteed
/// by the inbound transport, and all storage access serializes on the
/// database writer thread, so dispatches for distinct users may run
/// concurrently.
pub struct SessionEngine {
    db: Database,
    messenger: Arc<dyn Messenger>,
    scheduler: Arc<LifecycleScheduler>,
    settings: EngineSettings,
}

impl SessionEngine {
    pub fn new(
        db: Database,
        messenger: Arc<dyn Messenger>,
        scheduler: Arc<LifecycleScheduler>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            db,
            messenger,
            scheduler,
            settings,
        }
    }

    /// Route one inbound event through the conversation state machine.
    ///
    /// Infrastructure failures are logged, answered with a generic failure
    /// message, and returned; user-level problems never surface as errors
    /// here -- handlers turn them into re-prompts.
    pub async fn dispatch(&self, user_id: &UserId, event: Event) -> Result<(), RotaError> {
        let (state, mut data) = self.load_session(user_id).await?;
        debug!(user = %user_id, state = %state, "dispatching event");

        let step = match self.handle(user_id, state, &event, &mut data).await {
            Ok(Some(step)) => step,
            Ok(None) => {
                debug!(user = %user_id, state = %state, "event unmatched; dropped");
                return Ok(());
            }
            Err(e) => {
                error!(user = %user_id, state = %state, error = %e, "dispatch failed");
                let apology = Outbound::text("Something went wrong. Please try again later.");
                if let Err(send_err) = self.messenger.send(user_id, apology).await {
                    warn!(user = %user_id, error = %send_err, "failure notice send failed");
                }
                return Err(e);
            }
        };

        // Persistence precedes delivery.
        states::save(&self.db, user_id, &step.next.to_string(), &data.to_json()).await?;
        for reply in step.replies {
            if let Err(e) = self.messenger.send(user_id, reply).await {
                warn!(user = %user_id, error = %e, "reply send failed");
            }
        }
        Ok(())
    }

    async fn load_session(&self, user_id: &UserId) -> Result<(ChatState, SessionData), RotaError> {
        match states::load(&self.db, user_id).await? {
            Some(record) => Ok((
                parse_state(&record.state),
                SessionData::from_json(&record.data),
            )),
            None => Ok((ChatState::Menu, SessionData::default())),
        }
    }

    /// The exhaustive (state, event) table. Returns `None` for a silent drop.
    async fn handle(
        &self,
        user_id: &UserId,
        state: ChatState,
        event: &Event,
        data: &mut SessionData,
    ) -> Result<Option<Step>, RotaError> {
        // `/start` abandons any in-flight flow and returns to the menu,
        // from every state.
        if let Event::Command(cmd) = event {
            return if cmd == "start" {
                *data = SessionData::default();
                Ok(Some(self.open_menu(user_id, data).await?))
            } else {
                Ok(None)
            };
        }

        let step = match state {
            ChatState::Menu => match event {
                Event::Button(tag) => match tag.as_str() {
                    "add_queue" => self.begin_queue_creation(user_id, data).await?,
                    "active" | "planned" | "archived" => {
                        let status = parse_status_tag(tag);
                        Some(self.open_list(user_id, status, 1, data).await?)
                    }
                    other => match other.parse::<i64>() {
                        // Join affordances broadcast on opening carry the
                        // queue id; from the menu they open the detail view.
                        Ok(queue_id) => Some(self.open_detail(user_id, queue_id, data).await?),
                        Err(_) => None,
                    },
                },
                _ => None,
            },

            // --- Registration flow ---
            ChatState::RegName => match event {
                Event::Text(text) => Some(self.reg_take_name(text, data)),
                Event::Button(tag) if tag == "back" => {
                    Some(self.open_menu(user_id, data).await?)
                }
                _ => None,
            },
            ChatState::RegSurname => match event {
                Event::Text(text) => Some(self.reg_finish(user_id, text, data).await?),
                Event::Button(tag) if tag == "back" => {
                    Some(Step::to(ChatState::RegName, vec![prompt_reg_name()]))
                }
                _ => None,
            },

            // --- Queue-creation flow ---
            ChatState::QueueName => match event {
                Event::Text(text) => Some(self.create_take_name(text, data).await?),
                Event::Button(tag) if tag == "back" => {
                    Some(self.open_menu(user_id, data).await?)
                }
                _ => None,
            },
            ChatState::QueueStart => match event {
                Event::Text(text) => Some(self.create_take_start(text, data)),
                Event::Button(tag) if tag == "back" => {
                    Some(Step::to(ChatState::QueueName, vec![prompt_queue_name()]))
                }
                _ => None,
            },
            ChatState::QueueEnd => match event {
                Event::Text(text) => Some(self.create_take_end(text, data)),
                Event::Button(tag) if tag == "back" => {
                    Some(Step::to(ChatState::QueueStart, vec![prompt_start_dt()]))
                }
                _ => None,
            },
            ChatState::QueueNotify => match event {
                Event::Text(text) => Some(self.create_finish(user_id, text, data).await?),
                Event::Button(tag) if tag == "back" => {
                    Some(Step::to(ChatState::QueueEnd, vec![prompt_end_dt()]))
                }
                _ => None,
            },

            // --- Browsing flow ---
            ChatState::QueueList => match event {
                Event::Button(tag) => match tag.as_str() {
                    "back" => Some(self.open_menu(user_id, data).await?),
                    "prev" | "next" => {
                        let Some(browse) = data.browse.clone() else {
                            return Ok(Some(self.open_menu(user_id, data).await?));
                        };
                        let page = if tag == "next" {
                            browse.page + 1
                        } else {
                            browse.page.saturating_sub(1)
                        };
                        Some(self.open_list(user_id, browse.status, page, data).await?)
                    }
                    other => match other.parse::<i64>() {
                        Ok(queue_id) => Some(self.open_detail(user_id, queue_id, data).await?),
                        Err(_) => None,
                    },
                },
                Event::Text(text) => Some(self.list_jump_to_page(user_id, text, data).await?),
                _ => None,
            },
            ChatState::QueueDetail => match event {
                Event::Button(tag) => match tag.as_str() {
                    "back" => match data.browse.clone() {
                        Some(browse) => {
                            Some(self.open_list(user_id, browse.status, browse.page, data).await?)
                        }
                        None => Some(self.open_menu(user_id, data).await?),
                    },
                    other => match other.parse::<i64>() {
                        Ok(queue_id) => Some(self.join_queue(user_id, queue_id, data).await?),
                        Err(_) => None,
                    },
                },
                _ => None,
            },
        };
        Ok(step)
    }

    /// Render the menu, or route an unregistered user into registration.
    ///
    /// Landing here completes or abandons any flow, so the form data is
    /// reset.
    async fn open_menu(&self, user_id: &UserId, data: &mut SessionData) -> Result<Step, RotaError> {
        *data = SessionData::default();

        let Some(user) = users::get_user(&self.db, user_id).await? else {
            data.reg = Some(RegDraft::default());
            return Ok(Step::to(
                ChatState::RegName,
                vec![
                    Outbound::text("Welcome to the Rota queue bot! Let's get you registered."),
                    prompt_reg_name(),
                ],
            ));
        };

        let present = queues::statuses_present(&self.db).await?;
        let mut message = Outbound::text(menu_text(&user, present.is_empty()));
        for status in present {
            message = message.with_row(vec![Button::new(
                status_button_label(status),
                status.to_string(),
            )]);
        }
        if user.is_admin {
            message = message.with_row(vec![Button::new("Add queue", "add_queue")]);
        }
        Ok(Step::to(ChatState::Menu, vec![message]))
    }

    // --- Registration ---

    fn reg_take_name(&self, text: &str, data: &mut SessionData) -> Step {
        let name = text.trim();
        if name.is_empty() {
            return Step::to(
                ChatState::RegName,
                vec![Outbound::text("The name cannot be empty."), prompt_reg_name()],
            );
        }
        data.reg = Some(RegDraft {
            name: Some(name.to_string()),
        });
        Step::to(ChatState::RegSurname, vec![prompt_reg_surname()])
    }

    async fn reg_finish(
        &self,
        user_id: &UserId,
        text: &str,
        data: &mut SessionData,
    ) -> Result<Step, RotaError> {
        let surname = text.trim();
        if surname.is_empty() {
            return Ok(Step::to(
                ChatState::RegSurname,
                vec![
                    Outbound::text("The surname cannot be empty."),
                    prompt_reg_surname(),
                ],
            ));
        }

        let Some(name) = data.reg.as_ref().and_then(|r| r.name.clone()) else {
            // The draft vanished (schema drift); restart the flow.
            data.reg = Some(RegDraft::default());
            return Ok(Step::to(
                ChatState::RegName,
                vec![Outbound::text("Let's start over."), prompt_reg_name()],
            ));
        };

        // The duplicate check is on the (name, surname) pair, not the
        // identity: a taken pair is rejected back to the name prompt.
        if users::find_by_name_surname(&self.db, &name, surname)
            .await?
            .is_some()
        {
            data.reg = Some(RegDraft::default());
            return Ok(Step::to(
                ChatState::RegName,
                vec![
                    Outbound::text(format!("{name} {surname} is already registered.")),
                    prompt_reg_name(),
                ],
            ));
        }

        let user = User {
            id: user_id.clone(),
            name: name.clone(),
            surname: surname.to_string(),
            is_admin: self.settings.super_admin_id.as_deref() == Some(user_id.0.as_str()),
        };
        users::create_user(&self.db, &user).await?;
        debug!(user = %user_id, admin = user.is_admin, "user registered");

        let menu = self.open_menu(user_id, data).await?;
        Ok(Step::after(
            vec![Outbound::text("Registration complete!")],
            menu,
        ))
    }

    // --- Queue creation (admin only) ---

    async fn begin_queue_creation(
        &self,
        user_id: &UserId,
        data: &mut SessionData,
    ) -> Result<Option<Step>, RotaError> {
        let Some(user) = users::get_user(&self.db, user_id).await? else {
            return Ok(None);
        };
        if !user.is_admin {
            debug!(user = %user_id, "non-admin pressed add_queue; dropped");
            return Ok(None);
        }
        data.draft = Some(QueueDraft::default());
        Ok(Some(Step::to(ChatState::QueueName, vec![prompt_queue_name()])))
    }

    async fn create_take_name(
        &self,
        text: &str,
        data: &mut SessionData,
    ) -> Result<Step, RotaError> {
        let name = text.trim();
        if name.is_empty() {
            return Ok(Step::to(
                ChatState::QueueName,
                vec![
                    Outbound::text("The queue name cannot be empty."),
                    prompt_queue_name(),
                ],
            ));
        }
        if queues::name_exists(&self.db, name).await? {
            return Ok(Step::to(
                ChatState::QueueName,
                vec![
                    Outbound::text(format!("A queue named \"{name}\" already exists.")),
                    prompt_queue_name(),
                ],
            ));
        }
        data.draft.get_or_insert_with(QueueDraft::default).name = Some(name.to_string());
        Ok(Step::to(ChatState::QueueStart, vec![prompt_start_dt()]))
    }

    fn create_take_start(&self, text: &str, data: &mut SessionData) -> Step {
        let start = match parse_local(text, self.settings.utc_offset_hours) {
            Ok(dt) => dt,
            Err(e) => {
                return Step::to(
                    ChatState::QueueStart,
                    vec![Outbound::text(e.to_string()), prompt_start_dt()],
                );
            }
        };
        if start < Utc::now() {
            return Step::to(
                ChatState::QueueStart,
                vec![
                    Outbound::text("The opening time is already in the past."),
                    prompt_start_dt(),
                ],
            );
        }
        data.draft.get_or_insert_with(QueueDraft::default).start_dt = Some(start);
        Step::to(ChatState::QueueEnd, vec![prompt_end_dt()])
    }

    fn create_take_end(&self, text: &str, data: &mut SessionData) -> Step {
        let end = match parse_local(text, self.settings.utc_offset_hours) {
            Ok(dt) => dt,
            Err(e) => {
                return Step::to(
                    ChatState::QueueEnd,
                    vec![Outbound::text(e.to_string()), prompt_end_dt()],
                );
            }
        };
        let Some(start) = data.draft.as_ref().and_then(|d| d.start_dt) else {
            return Step::to(
                ChatState::QueueStart,
                vec![Outbound::text("Let's start over."), prompt_start_dt()],
            );
        };
        if (end - start).num_seconds() < self.settings.min_open_duration_secs {
            return Step::to(
                ChatState::QueueEnd,
                vec![
                    Outbound::text(format!(
                        "The queue must stay open for at least {} seconds.",
                        self.settings.min_open_duration_secs
                    )),
                    prompt_end_dt(),
                ],
            );
        }
        data.draft.get_or_insert_with(QueueDraft::default).end_dt = Some(end);
        Step::to(ChatState::QueueNotify, vec![prompt_notify_dt()])
    }

    async fn create_finish(
        &self,
        user_id: &UserId,
        text: &str,
        data: &mut SessionData,
    ) -> Result<Step, RotaError> {
        let notify = match parse_local(text, self.settings.utc_offset_hours) {
            Ok(dt) => dt,
            Err(e) => {
                return Ok(Step::to(
                    ChatState::QueueNotify,
                    vec![Outbound::text(e.to_string()), prompt_notify_dt()],
                ));
            }
        };
        if notify < Utc::now() {
            return Ok(Step::to(
                ChatState::QueueNotify,
                vec![
                    Outbound::text("The announcement time is already in the past."),
                    prompt_notify_dt(),
                ],
            ));
        }

        let draft = data.draft.clone().unwrap_or_default();
        let (Some(name), Some(start), Some(end)) = (draft.name, draft.start_dt, draft.end_dt)
        else {
            data.draft = Some(QueueDraft::default());
            return Ok(Step::to(
                ChatState::QueueName,
                vec![Outbound::text("Let's start over."), prompt_queue_name()],
            ));
        };

        if (start - notify).num_seconds() <= self.settings.min_notify_lead_secs {
            return Ok(Step::to(
                ChatState::QueueNotify,
                vec![
                    Outbound::text(format!(
                        "The announcement must be sent more than {} seconds before the opening.",
                        self.settings.min_notify_lead_secs
                    )),
                    prompt_notify_dt(),
                ],
            ));
        }

        // The name may have been taken while the flow was in progress.
        if queues::name_exists(&self.db, &name).await? {
            data.draft = Some(QueueDraft::default());
            return Ok(Step::to(
                ChatState::QueueName,
                vec![
                    Outbound::text(format!("A queue named \"{name}\" already exists.")),
                    prompt_queue_name(),
                ],
            ));
        }

        let queue = queues::create(
            &self.db,
            queues::NewQueue {
                name,
                start_dt: start,
                end_dt: end,
                notify_dt: notify,
            },
        )
        .await?;
        // The record is committed before the timers arm; if the process
        // dies between the two, startup reconciliation re-arms them.
        self.scheduler.schedule_on_create(&queue);

        let done = Outbound::text(format!("Queue \"{}\" has been created.", queue.name));
        let menu = self.open_menu(user_id, data).await?;
        Ok(Step::after(vec![done], menu))
    }

    // --- Browsing ---

    async fn open_list(
        &self,
        user_id: &UserId,
        status: QueueStatus,
        page: usize,
        data: &mut SessionData,
    ) -> Result<Step, RotaError> {
        let listing = queues::list_by_status(&self.db, status).await?;
        if listing.is_empty() {
            let notice = Outbound::text(format!("No {status} queues yet."));
            let menu = self.open_menu(user_id, data).await?;
            return Ok(Step::after(vec![notice], menu));
        }

        let page = paginate(&listing, self.settings.page_size, page);
        data.browse = Some(BrowseState {
            status,
            page: page.page,
            pages_count: page.pages_count,
            queue_id: None,
        });

        let mut message = Outbound::text(format!(
            "Found {} {} queue(s), page {}/{}.\nSend a page number to jump to it.",
            listing.len(),
            status,
            page.page,
            page.pages_count
        ));
        for queue in &page.items {
            message = message.with_row(vec![Button::new(
                list_row_label(queue, self.settings.utc_offset_hours),
                queue.id.to_string(),
            )]);
        }
        let mut nav = Vec::new();
        if page.page > 1 {
            nav.push(Button::new("Previous page", "prev"));
        }
        if page.page < page.pages_count {
            nav.push(Button::new("Next page", "next"));
        }
        if !nav.is_empty() {
            message = message.with_row(nav);
        }
        message = message.with_row(vec![Button::new("Back", "back")]);

        Ok(Step::to(ChatState::QueueList, vec![message]))
    }

    async fn list_jump_to_page(
        &self,
        user_id: &UserId,
        text: &str,
        data: &mut SessionData,
    ) -> Result<Step, RotaError> {
        let Some(browse) = data.browse.clone() else {
            return self.open_menu(user_id, data).await;
        };
        match text.trim().parse::<usize>() {
            Ok(n) if (1..=browse.pages_count).contains(&n) => {
                self.open_list(user_id, browse.status, n, data).await
            }
            // Out-of-range or non-numeric input rejects without moving
            // the cursor.
            _ => Ok(Step::to(
                ChatState::QueueList,
                vec![Outbound::text("Invalid page number.")],
            )),
        }
    }

    async fn open_detail(
        &self,
        user_id: &UserId,
        queue_id: i64,
        data: &mut SessionData,
    ) -> Result<Step, RotaError> {
        let Some(queue) = queues::get(&self.db, queue_id).await? else {
            return self.vanished_queue_fallback(user_id, data).await;
        };

        let roster = attendants::roster(&self.db, queue_id).await?;
        let viewer_joined = roster.iter().any(|(a, _)| &a.user_id == user_id);

        let mut lines = vec![
            format!("Name: {}", queue.name),
            format!("Status: {}", queue.status),
            format!(
                "Opens: {}",
                format_local_short(queue.start_dt, self.settings.utc_offset_hours)
            ),
            format!(
                "Closes: {}",
                format_local_short(queue.end_dt, self.settings.utc_offset_hours)
            ),
        ];
        if !roster.is_empty() {
            lines.push(String::new());
            for (attendant, user) in &roster {
                let mut line = format!("{}. {} {}", attendant.position, user.name, user.surname);
                if &attendant.user_id == user_id {
                    line.push_str(" (you)");
                }
                lines.push(line);
            }
        }

        let mut message = Outbound::text(lines.join("\n"));
        if queue.status == QueueStatus::Active && !viewer_joined {
            message = message.with_row(vec![Button::new("Join the queue", queue.id.to_string())]);
        }
        message = message.with_row(vec![Button::new("Back", "back")]);

        match data.browse.as_mut() {
            Some(browse) => browse.queue_id = Some(queue_id),
            None => {
                // Reached straight from a broadcast join affordance.
                data.browse = Some(BrowseState {
                    status: queue.status,
                    page: 1,
                    pages_count: 1,
                    queue_id: Some(queue_id),
                });
            }
        }

        Ok(Step::to(ChatState::QueueDetail, vec![message]))
    }

    async fn join_queue(
        &self,
        user_id: &UserId,
        queue_id: i64,
        data: &mut SessionData,
    ) -> Result<Step, RotaError> {
        if users::get_user(&self.db, user_id).await?.is_none() {
            let menu = self.open_menu(user_id, data).await?;
            return Ok(Step::after(
                vec![Outbound::text("Please register before joining a queue.")],
                menu,
            ));
        }

        let outcome = attendants::join(&self.db, queue_id, user_id).await?;
        let notice = match outcome {
            JoinOutcome::Joined(position) => {
                debug!(user = %user_id, queue_id, position, "joined queue");
                Outbound::text(format!("You are in! Your position is {position}."))
            }
            JoinOutcome::AlreadyJoined => Outbound::text("You have already joined this queue."),
            JoinOutcome::NotOpen => Outbound::text("This queue is not open for signup."),
            JoinOutcome::QueueMissing => {
                return self.vanished_queue_fallback(user_id, data).await;
            }
        };

        let detail = self.open_detail(user_id, queue_id, data).await?;
        Ok(Step::after(vec![notice], detail))
    }

    /// Neutral fallback when a referenced queue vanished between steps.
    async fn vanished_queue_fallback(
        &self,
        user_id: &UserId,
        data: &mut SessionData,
    ) -> Result<Step, RotaError> {
        let notice = Outbound::text("This queue no longer exists.");
        let step = match data.browse.clone() {
            Some(browse) => {
                self.open_list(user_id, browse.status, browse.page, data).await?
            }
            None => self.open_menu(user_id, data).await?,
        };
        Ok(Step::after(vec![notice], step))
    }
}

// --- Rendering helpers ---

fn menu_text(user: &User, no_queues: bool) -> String {
    let mut text = format!("User: {} {}", user.name, user.surname);
    if no_queues {
        text.push_str("\n\nNo queues yet.");
    }
    text
}

fn status_button_label(status: QueueStatus) -> &'static str {
    match status {
        QueueStatus::Active => "Active queues",
        QueueStatus::Planned => "Planned queues",
        QueueStatus::Archived => "Archived queues",
    }
}

fn parse_status_tag(tag: &str) -> QueueStatus {
    match tag {
        "active" => QueueStatus::Active,
        "archived" => QueueStatus::Archived,
        _ => QueueStatus::Planned,
    }
}

fn list_row_label(queue: &Queue, utc_offset_hours: i32) -> String {
    format!(
        "{} [{} – {}]",
        queue.name,
        format_local_short(queue.start_dt, utc_offset_hours),
        format_local_short(queue.end_dt, utc_offset_hours),
    )
}

fn back_button_row() -> Vec<Button> {
    vec![Button::new("Back", "back")]
}

fn prompt_reg_name() -> Outbound {
    Outbound::text("Enter your name").with_row(back_button_row())
}

fn prompt_reg_surname() -> Outbound {
    Outbound::text("Enter your surname").with_row(back_button_row())
}

fn prompt_queue_name() -> Outbound {
    Outbound::text("Enter the queue name").with_row(back_button_row())
}

fn prompt_start_dt() -> Outbound {
    Outbound::text("Enter the opening date and time\nFormat: DD.MM.YYYY hh:mm:ss")
        .with_row(back_button_row())
}

fn prompt_end_dt() -> Outbound {
    Outbound::text("Enter the closing date and time\nFormat: DD.MM.YYYY hh:mm:ss")
        .with_row(back_button_row())
}

fn prompt_notify_dt() -> Outbound {
    Outbound::text(
        "Enter the date and time for the opening announcement\nFormat: DD.MM.YYYY hh:mm:ss",
    )
    .with_row(back_button_row())
}
