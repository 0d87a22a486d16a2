//! Menu navigation state.
//!
//! Panels, time scale and cursor mode are plain values here. Widgets and
//! scene loading belong to the host; they observe these states and act on
//! the [`MenuCommand`]s returned by transitions.

use bevy::prelude::Resource;
use log::info;

/// Scene started from the main menu.
pub const GAME_SCENE: &str = "GameScene";
/// Scene the pause menu returns to.
pub const MAIN_MENU_SCENE: &str = "MainMenu";

/// Side effect requested by a menu transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    /// Load the named scene.
    LoadScene(&'static str),
    /// Quit the application.
    Quit,
}

/// Panels of the main menu; exactly one is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MainMenuPanel {
    /// The root menu with play, settings, credits and quit.
    #[default]
    Menu,
    /// Audio settings.
    Settings,
    /// Credits.
    Credits,
}

/// Buttons of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuAction {
    /// Start the game.
    Play,
    /// Show the settings panel.
    OpenSettings,
    /// Show the credits panel.
    OpenCredits,
    /// Return from settings or credits.
    Back,
    /// Leave the application.
    Quit,
}

/// Main menu navigation.
///
/// # Examples
///
/// ```
/// use gravflip::menu::{MainMenu, MainMenuAction, MainMenuPanel, MenuCommand};
///
/// let mut menu = MainMenu::default();
/// assert_eq!(menu.apply(MainMenuAction::OpenCredits), None);
/// assert_eq!(menu.panel(), MainMenuPanel::Credits);
/// assert_eq!(menu.apply(MainMenuAction::Play), Some(MenuCommand::LoadScene("GameScene")));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MainMenu {
    panel: MainMenuPanel,
}

impl MainMenu {
    /// The visible panel.
    #[must_use]
    pub const fn panel(&self) -> MainMenuPanel {
        self.panel
    }

    /// Handles a button press.
    pub const fn apply(&mut self, action: MainMenuAction) -> Option<MenuCommand> {
        match action {
            MainMenuAction::Play => Some(MenuCommand::LoadScene(GAME_SCENE)),
            MainMenuAction::OpenSettings => {
                self.panel = MainMenuPanel::Settings;
                None
            }
            MainMenuAction::OpenCredits => {
                self.panel = MainMenuPanel::Credits;
                None
            }
            MainMenuAction::Back => {
                self.panel = MainMenuPanel::Menu;
                None
            }
            MainMenuAction::Quit => Some(MenuCommand::Quit),
        }
    }
}

/// In-game pause state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PauseState {
    /// Gameplay runs; no menu is visible.
    #[default]
    Playing,
    /// The pause panel is visible.
    Paused,
    /// The settings panel is visible while paused.
    Settings,
}

/// Inputs driving the pause menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseAction {
    /// Escape key: pauses, or resumes from the pause panel.
    Escape,
    /// Resume button.
    Resume,
    /// Settings button on the pause panel.
    OpenSettings,
    /// Back button on the settings panel.
    BackToPause,
    /// Quit-to-menu button.
    QuitToMainMenu,
}

/// Cursor behaviour requested by the current pause state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMode {
    /// Locked to the window centre and hidden.
    Locked,
    /// Free and visible.
    Free,
}

/// Pause menu state machine.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PauseMenu {
    state: PauseState,
}

impl PauseMenu {
    /// Current state.
    #[must_use]
    pub const fn state(&self) -> PauseState {
        self.state
    }

    /// Whether gameplay input should be processed.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        matches!(self.state, PauseState::Playing)
    }

    /// Simulation speed multiplier: frozen whenever a menu is open.
    #[must_use]
    pub const fn time_scale(&self) -> f32 {
        if self.is_playing() {
            1.0
        } else {
            0.0
        }
    }

    /// Cursor mode for the current state.
    #[must_use]
    pub const fn cursor(&self) -> CursorMode {
        if self.is_playing() {
            CursorMode::Locked
        } else {
            CursorMode::Free
        }
    }

    /// Handles an input, returning a scene change when one is requested.
    ///
    /// Escape only resumes from the pause panel itself; from settings it
    /// returns to the pause panel.
    pub fn apply(&mut self, action: PauseAction) -> Option<MenuCommand> {
        let (next, command) = match (self.state, action) {
            (PauseState::Paused, PauseAction::Escape) | (_, PauseAction::Resume) => {
                (PauseState::Playing, None)
            }
            (_, PauseAction::Escape | PauseAction::BackToPause) => (PauseState::Paused, None),
            (_, PauseAction::OpenSettings) => (PauseState::Settings, None),
            (_, PauseAction::QuitToMainMenu) => (
                PauseState::Playing,
                Some(MenuCommand::LoadScene(MAIN_MENU_SCENE)),
            ),
        };
        if next != self.state {
            info!("pause menu {:?} -> {next:?}", self.state);
        }
        self.state = next;
        command
    }
}
