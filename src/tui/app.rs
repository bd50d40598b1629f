use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use super::events::{AppEvent, Focus, Notification, NotificationLevel};
use super::theme;
use super::views::campaign::{CampaignCommand, CampaignViewState};
use super::views::copilot::{CopilotCommand, CopilotState};
use super::views::party_chat::{PartyChatState, PartyCommand};
use super::views::ViewInput;
use crate::core::campaign::{
    random_pregenerated, Campaign, CampaignResult, CampaignStore, DiceRoller, LogEntryType, PlayerMessage,
};
use crate::core::llm::prompts::PANIC_PROMPT;
use crate::core::llm::{CoPilot, GeneratedImage};
use crate::core::session::{copilot_chat, player_chat};

/// A destructive action waiting on a y/n answer.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfirmAction {
    ClearCopilot,
    RemoveCharacter(String),
}

#[derive(Debug, Clone)]
struct PendingConfirm {
    prompt: String,
    action: ConfirmAction,
}

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Pane with keyboard focus.
    pub focus: Focus,
    store: CampaignStore,
    campaign_id: String,
    copilot: CoPilot,
    roller: DiceRoller,
    copilot_view: CopilotState,
    party: PartyChatState,
    campaign_view: CampaignViewState,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    notification_counter: u64,
    pub show_help: bool,
    pending_confirm: Option<PendingConfirm>,
    /// Where shared illustrations are written.
    images_dir: PathBuf,
    /// Receiver for background task results.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Handed to spawned AI tasks.
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl AppState {
    pub fn new(
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
        store: CampaignStore,
        campaign_id: impl Into<String>,
        copilot: CoPilot,
        data_dir: &Path,
    ) -> Self {
        Self {
            running: true,
            focus: Focus::Copilot,
            store,
            campaign_id: campaign_id.into(),
            copilot,
            roller: DiceRoller::new(),
            copilot_view: CopilotState::new(),
            party: PartyChatState::new(),
            campaign_view: CampaignViewState::new(),
            notifications: Vec::new(),
            notification_counter: 0,
            show_help: false,
            pending_confirm: None,
            images_dir: data_dir.join("images"),
            event_rx,
            event_tx,
        }
    }

    /// The campaign on screen, as of the latest edit.
    pub fn campaign(&self) -> Option<Arc<Campaign>> {
        self.store.get(&self.campaign_id)
    }

    pub fn store(&self) -> &CampaignStore {
        &self.store
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        if !self.copilot.is_configured() {
            self.push_notification(
                "No API key found. Set GEMINI_API_KEY to wake the co-pilot.".to_string(),
                NotificationLevel::Warning,
            );
        }

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.handle_event(AppEvent::Tick);
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick => self.on_tick(),
            AppEvent::Input(Event::Key(key)) if key.kind == KeyEventKind::Press => self.handle_key(key),
            AppEvent::Input(_) => {}
            AppEvent::CopilotReply { campaign_id, message } => {
                self.copilot_view.on_reply();
                let result = self.store.append_ai_messages(&campaign_id, [message]);
                self.report(result);
            }
            AppEvent::DmReply { campaign_id, message } => {
                self.party.on_dm_reply();
                let result = player_chat::deliver(&mut self.store, &campaign_id, message);
                self.report(result);
            }
            AppEvent::ImageReady { campaign_id, message } => {
                self.party.on_image_done();
                match save_image(&self.images_dir, &message) {
                    Ok(Some(path)) => self.push_notification(
                        format!("Image saved to {}", path.display()),
                        NotificationLevel::Success,
                    ),
                    Ok(None) => {}
                    Err(e) => log::warn!("Failed to save shared image: {}", e),
                }
                let result = player_chat::deliver(&mut self.store, &campaign_id, message);
                self.report(result);
            }
            AppEvent::ImageFailed(reason) => {
                self.party.on_image_done();
                self.push_notification(reason, NotificationLevel::Warning);
            }
            AppEvent::Notification(n) => self.push_notification(n.message, n.level),
            AppEvent::Quit => self.running = false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let KeyEvent { code, modifiers, .. } = key;

        // Priority 1: pending confirmation owns the keyboard
        if let Some(pending) = self.pending_confirm.take() {
            match code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.confirm(pending.action),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {}
                _ => self.pending_confirm = Some(pending),
            }
            return;
        }

        // Priority 2: help modal
        if self.show_help {
            self.show_help = false;
            return;
        }

        if modifiers == KeyModifiers::CONTROL && matches!(code, KeyCode::Char('c') | KeyCode::Char('q')) {
            self.running = false;
            return;
        }

        // Priority 3: focused pane
        let Some(campaign) = self.campaign() else {
            self.running = false;
            return;
        };
        let handled = match self.focus {
            Focus::Copilot => match self.copilot_view.handle_key(code, modifiers, &campaign) {
                ViewInput::Command(command) => {
                    self.run_copilot(command);
                    true
                }
                other => other == ViewInput::Consumed,
            },
            Focus::PartyChat => match self.party.handle_key(code, modifiers, &campaign) {
                ViewInput::Command(command) => {
                    self.run_party(command, &campaign);
                    true
                }
                other => other == ViewInput::Consumed,
            },
            Focus::Campaign => match self.campaign_view.handle_key(code, modifiers, &campaign) {
                ViewInput::Command(command) => {
                    self.run_campaign(command, &campaign);
                    true
                }
                other => other == ViewInput::Consumed,
            },
        };
        if handled {
            return;
        }

        // Priority 4: global keymap
        match code {
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::F(1) => self.show_help = true,
            _ => {}
        }
    }

    // ── Commands ────────────────────────────────────────────────────────

    fn run_copilot(&mut self, command: CopilotCommand) {
        let question = match command {
            CopilotCommand::Ask(text) => text,
            CopilotCommand::Panic => {
                log::info!("Panic button pressed for campaign {}", self.campaign_id);
                PANIC_PROMPT.to_string()
            }
            CopilotCommand::Quick(action) => action.prompt().to_string(),
            CopilotCommand::Clear => {
                let id = self.campaign_id.clone();
                let mut asked = None;
                let result = copilot_chat::clear(&mut self.store, &id, |prompt| {
                    asked = Some(prompt.to_string());
                    false
                });
                self.report(result);
                if let Some(prompt) = asked {
                    self.pending_confirm = Some(PendingConfirm {
                        prompt,
                        action: ConfirmAction::ClearCopilot,
                    });
                }
                return;
            }
        };

        let history = match copilot_chat::push_question(&mut self.store, &self.campaign_id, &question) {
            Ok(Some(history)) => history,
            Ok(None) => {
                self.copilot_view.on_reply();
                return;
            }
            Err(e) => {
                self.copilot_view.on_reply();
                self.report::<()>(Err(e));
                return;
            }
        };

        let copilot = self.copilot.clone();
        let tx = self.event_tx.clone();
        let campaign_id = self.campaign_id.clone();
        tokio::spawn(async move {
            let message = copilot_chat::answer(&copilot, &history, &question).await;
            let _ = tx.send(AppEvent::CopilotReply { campaign_id, message });
        });
    }

    fn run_party(&mut self, command: PartyCommand, campaign: &Campaign) {
        let id = self.campaign_id.clone();
        let narrate = campaign.is_ai_dm && command.is_player_action();
        let result = match command {
            PartyCommand::Post(text) => player_chat::post_message(&mut self.store, &id, &text).map(|posted| posted.is_some()),
            PartyCommand::Roll(sides) => player_chat::roll_die(&mut self.store, &id, &mut self.roller, sides).map(|_| true),
            PartyCommand::RollNotation(notation) => {
                player_chat::roll_notation(&mut self.store, &id, &mut self.roller, &notation).map(|_| true)
            }
            PartyCommand::RequestRoll(check) => {
                player_chat::request_roll(&mut self.store, &id, &mut self.roller, check).map(|_| true)
            }
            PartyCommand::StartMeeting => player_chat::start_meeting(&mut self.store, &id).map(|_| true),
            PartyCommand::ShareImage(prompt) => {
                self.spawn_illustration(campaign, prompt);
                Ok(false)
            }
        };

        let acted = matches!(result, Ok(true));
        self.report(result);
        if acted && narrate {
            self.spawn_narration();
        }
    }

    fn spawn_narration(&mut self) {
        let Some(snapshot) = self.campaign() else {
            return;
        };
        self.party.dm_busy = true;
        let copilot = self.copilot.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            if let Some(message) = player_chat::narrate(&copilot, &snapshot).await {
                let _ = tx.send(AppEvent::DmReply {
                    campaign_id: snapshot.id.clone(),
                    message,
                });
            }
        });
    }

    fn spawn_illustration(&mut self, campaign: &Campaign, prompt: String) {
        let snapshot = campaign.clone();
        let copilot = self.copilot.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let event = match player_chat::illustrate(&copilot, &snapshot, &prompt).await {
                Ok(Some(message)) => AppEvent::ImageReady {
                    campaign_id: snapshot.id.clone(),
                    message,
                },
                Ok(None) => AppEvent::ImageFailed("No image came back for that scene.".to_string()),
                Err(e) => {
                    log::error!("Image generation failed: {}", e);
                    AppEvent::ImageFailed(format!("Image generation failed: {e}"))
                }
            };
            let _ = tx.send(event);
        });
    }

    fn run_campaign(&mut self, command: CampaignCommand, campaign: &Campaign) {
        let id = self.campaign_id.clone();
        match command {
            CampaignCommand::AddNote(text) => {
                let result = self.store.append_log(&id, &text, LogEntryType::Note);
                self.report(result);
            }
            CampaignCommand::AddCharacter => {
                let draft = random_pregenerated(&mut rand::thread_rng());
                let name = draft.name.clone();
                let result = self.store.add_character(&id, draft);
                if self.report(result).is_some() {
                    self.push_notification(format!("{name} joined the party"), NotificationLevel::Success);
                }
            }
            CampaignCommand::RemoveCharacter(character_id) => {
                let mut asked = None;
                let result = self.store.remove_character(&id, &character_id, |prompt| {
                    asked = Some(prompt.to_string());
                    false
                });
                self.report(result);
                if let Some(prompt) = asked {
                    self.pending_confirm = Some(PendingConfirm {
                        prompt,
                        action: ConfirmAction::RemoveCharacter(character_id),
                    });
                }
            }
            CampaignCommand::ToggleAiDm => {
                let result = self.store.set_ai_dm(&id, !campaign.is_ai_dm);
                self.report(result);
            }
        }
    }

    fn confirm(&mut self, action: ConfirmAction) {
        let id = self.campaign_id.clone();
        let result = match action {
            ConfirmAction::ClearCopilot => copilot_chat::clear(&mut self.store, &id, |_| true),
            ConfirmAction::RemoveCharacter(character_id) => {
                self.store.remove_character(&id, &character_id, |_| true)
            }
        };
        self.report(result);
    }

    /// Surface a store error to the user; pass successes through.
    fn report<T>(&mut self, result: CampaignResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                log::error!("Campaign update failed: {}", e);
                self.push_notification(e.to_string(), NotificationLevel::Error);
                None
            }
        }
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notification_counter += 1;
        self.notifications.push(Notification {
            id: self.notification_counter,
            message,
            level,
            ttl_ticks: 100,
        });

        while self.notifications.len() > 3 {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

        match self.campaign() {
            Some(campaign) => {
                let columns =
                    Layout::horizontal([Constraint::Percentage(42), Constraint::Percentage(58)]).split(rows[0]);
                let right = Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)]).split(columns[1]);

                self.copilot_view
                    .render(frame, columns[0], &campaign, self.focus == Focus::Copilot);
                self.party
                    .render(frame, right[0], &campaign, self.focus == Focus::PartyChat);
                self.campaign_view
                    .render(frame, right[1], &campaign, self.focus == Focus::Campaign);
            }
            None => frame.render_widget(
                Paragraph::new("Campaign not found.").style(Style::default().fg(theme::ERROR)),
                rows[0],
            ),
        }

        self.render_status_bar(frame, rows[1]);
        self.render_notifications(frame, area);

        if self.show_help {
            self.render_help_modal(frame, area);
        }
        if let Some(ref pending) = self.pending_confirm {
            self.render_confirm(frame, area, pending);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let ai_status = if self.copilot.is_configured() {
            Span::styled("online", Style::default().fg(theme::SUCCESS))
        } else {
            Span::styled("offline", Style::default().fg(theme::TEXT_MUTED))
        };

        let status = Line::from(vec![
            Span::styled(" DM Co-Pilot ", theme::brand_badge()),
            Span::raw(" "),
            Span::styled(
                self.focus.label(),
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ "),
            Span::styled("AI:", theme::key_hint()),
            Span::raw(" "),
            ai_status,
            Span::raw(" │ "),
            Span::styled("Tab", theme::key_hint()),
            Span::raw(":focus "),
            Span::styled("F1", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("^C", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = self.notifications.len() as u16;
        let x = area.width.saturating_sub(max_width + 1);
        let notification_area = Rect::new(x, 1, max_width, height);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::INFO),
                    NotificationLevel::Success => ("✓", theme::SUCCESS),
                    NotificationLevel::Warning => ("⚠", theme::WARNING),
                    NotificationLevel::Error => ("✗", theme::ERROR),
                };
                Line::from(vec![
                    Span::styled(format!(" {prefix} "), Style::default().fg(color).bold()),
                    Span::raw(&n.message),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }

    fn render_confirm(&self, frame: &mut Frame, area: Rect, pending: &PendingConfirm) {
        let modal = centered_rect(40, 20, area);
        let block = Block::default()
            .title(" Confirm ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));
        let lines = vec![
            Line::raw(""),
            Line::styled(pending.prompt.clone(), Style::default().fg(theme::TEXT).bold()),
            Line::raw(""),
            Line::from(vec![
                Span::styled("[y]", theme::key_hint()),
                Span::raw(" yes   "),
                Span::styled("[n]", theme::key_hint()),
                Span::raw(" no"),
            ]),
        ];

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center).block(block), modal);
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 80, area);

        let keybindings = [
            ("Global:", ""),
            ("Tab / Shift+Tab", "Next / previous pane"),
            ("F1", "Toggle this help"),
            ("Ctrl+C / Ctrl+Q", "Quit"),
            ("Up / Down, PgUp / PgDn", "Scroll transcript"),
            ("", ""),
            ("Co-Pilot:", ""),
            ("Enter", "Ask"),
            ("Ctrl+X", "Panic button"),
            ("Ctrl+N / Ctrl+L / Ctrl+K", "New NPC / Location / Quest hook"),
            ("Ctrl+R", "Clear chat history"),
            ("", ""),
            ("Party Chat:", ""),
            ("F2-F7", "Roll d4 d6 d8 d10 d12 d20"),
            ("F8 / F9", "Roll Initiative / Perception"),
            ("F10", "Start a video meeting"),
            ("Ctrl+G", "Share an illustration"),
            ("", ""),
            ("Campaign:", ""),
            ("Enter", "Add a note to the log"),
            ("Ctrl+P", "Add a pre-generated character"),
            ("Delete", "Remove selected character"),
            ("Ctrl+T", "Toggle AI Dungeon Master"),
        ];

        let lines: Vec<Line> = keybindings
            .iter()
            .map(|(key, desc)| {
                if desc.is_empty() {
                    Line::styled(key.to_string(), theme::title())
                } else {
                    Line::from(vec![
                        Span::styled(format!("  {key:<26}"), theme::key_hint()),
                        Span::raw(desc.to_string()),
                    ])
                }
            })
            .collect();

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::PRIMARY));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

/// Write a shared illustration to `dir` as `{message id}.{ext}`. `Ok(None)`
/// when the message carries no inline image.
fn save_image(dir: &Path, message: &PlayerMessage) -> io::Result<Option<PathBuf>> {
    let Some(image) = message.attachment_url.as_deref().and_then(GeneratedImage::from_data_url) else {
        return Ok(None);
    };
    let bytes = image
        .decode()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.{}", message.id, image.extension()));
    fs::write(&path, bytes)?;
    Ok(Some(path))
}

/// Calculate a centered rect using percentage of parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
