// src/cli/session.rs

//! The launcher's control loop.
//!
//! Each phase is a plain function from the current phase to the next one. The only
//! data carried between cycles is the [`SessionState`], so leaving an active
//! environment and entering another never re-enters a prompt from inside a prompt.

use anyhow::{Context, Result};

use crate::{
    cli::{
        dispatcher::{self, MenuFlow},
        handlers::MenuContext,
        menu,
    },
    constants::CONFIG_DIR_ENV_VAR,
    core::{
        activation::{self, Activation},
        environment_manager::EnvironmentManager,
        proxy::ProxyAction,
    },
    models::{EnvironmentRecord, Registry},
    state::SessionState,
    system::{
        executor,
        terminal::{Terminal, Tone},
    },
};

/// Where the loop is. `Selecting` carries the registry it was rendered from, or
/// `None` if it could not be loaded this cycle.
enum Phase {
    MenuDisplay,
    Selecting(Option<Registry>),
    Activating(EnvironmentRecord),
    Active(Box<Activation>),
    Switching,
    Exiting,
}

/// Drives one launcher session from the first menu to the closing message.
pub struct Session<'a> {
    manager: &'a EnvironmentManager,
    terminal: &'a mut dyn Terminal,
    state: SessionState,
    first_cycle: bool,
}

impl<'a> Session<'a> {
    /// Creates a session that starts from `state` on the first menu cycle.
    pub fn new(
        manager: &'a EnvironmentManager,
        terminal: &'a mut dyn Terminal,
        state: SessionState,
    ) -> Self {
        Self {
            manager,
            terminal,
            state,
            first_cycle: true,
        }
    }

    /// Runs until the user quits or input ends.
    ///
    /// Only a registry that cannot be loaded on the very first cycle is returned as
    /// an error. Everything later is reported and the loop carries on.
    pub fn run(mut self) -> Result<()> {
        self.terminal.start_transcript();

        let mut phase = Phase::MenuDisplay;
        loop {
            phase = match phase {
                Phase::MenuDisplay => self.display_menu()?,
                Phase::Selecting(registry) => self.select(registry.as_ref())?,
                Phase::Activating(record) => self.activate(&record),
                Phase::Active(activation) => self.run_active(&activation)?,
                Phase::Switching => self.switch(),
                Phase::Exiting => break,
            };
        }

        self.terminal.say(
            Tone::Heading,
            &format!(t!("session.goodbye"), version = env!("CARGO_PKG_VERSION")),
        );
        self.terminal.close();
        Ok(())
    }

    fn display_menu(&mut self) -> Result<Phase> {
        let first_cycle = std::mem::replace(&mut self.first_cycle, false);

        let registry = match self.manager.list() {
            Ok(registry) => registry,
            Err(e) if first_cycle => {
                return Err(e).context(t!("session.error.startup_load"));
            }
            Err(e) => {
                log::warn!("Registry unavailable this cycle: {}", e);
                menu::render_unavailable(&mut *self.terminal);
                self.terminal.say(Tone::Error, &e.to_string());
                if let Some(target) = self.state.take_pending_target() {
                    log::debug!("Dropping switch target '{}'", target);
                }
                return Ok(Phase::Selecting(None));
            }
        };

        menu::render(&mut *self.terminal, &registry);

        if let Some(target) = self.state.take_pending_target() {
            match registry.find_by_name(&target) {
                Some((number, record)) => {
                    log::debug!("Pending switch to '{}' resolved to #{}", target, number);
                    self.terminal.say(
                        Tone::Success,
                        &format!(t!("session.info.switching_to"), name = record.name),
                    );
                    return Ok(Phase::Activating(record.clone()));
                }
                None => self.terminal.say(
                    Tone::Warning,
                    &format!(t!("session.warning.target_not_found"), name = target),
                ),
            }
        }

        Ok(Phase::Selecting(Some(registry)))
    }

    fn select(&mut self, registry: Option<&Registry>) -> Result<Phase> {
        let Some(input) = self.terminal.read_line(t!("menu.prompt.select"))? else {
            return Ok(Phase::Exiting);
        };
        let choice = input.trim();
        if choice.is_empty() {
            return Ok(Phase::MenuDisplay);
        }

        if let Some(command) = dispatcher::find_command(choice) {
            let mut context = MenuContext {
                manager: self.manager,
                terminal: &mut *self.terminal,
            };
            return Ok(match dispatcher::dispatch(command, &mut context) {
                Ok(MenuFlow::Continue) => Phase::MenuDisplay,
                Ok(MenuFlow::Quit) => Phase::Exiting,
                Err(e) => {
                    log::debug!("Menu command '{}' failed: {:?}", command.key, e);
                    self.terminal.say(Tone::Error, &format!("{:#}", e));
                    Phase::MenuDisplay
                }
            });
        }

        let selected = choice
            .parse::<usize>()
            .ok()
            .and_then(|number| registry.and_then(|r| r.by_number(number)));
        Ok(match selected {
            Some(record) => Phase::Activating(record.clone()),
            None => {
                self.terminal.say(Tone::Error, t!("menu.error.invalid_option"));
                Phase::MenuDisplay
            }
        })
    }

    fn activate(&mut self, record: &EnvironmentRecord) -> Phase {
        let activation = match activation::activate(record, self.manager.executable()) {
            Ok(activation) => activation,
            Err(e) => {
                self.terminal.say(Tone::Error, &e.to_string());
                return Phase::MenuDisplay;
            }
        };

        self.terminal.say(
            Tone::Dim,
            &format!(
                t!("session.info.config_dir"),
                var = CONFIG_DIR_ENV_VAR,
                path = activation.config_dir.display()
            ),
        );
        if !activation.executable_available() {
            self.terminal.say(
                Tone::Warning,
                &format!(
                    t!("session.warning.executable_missing"),
                    executable = self.manager.executable(),
                    path = activation.root.display()
                ),
            );
        }
        self.terminal.say(
            Tone::Success,
            &format!(t!("session.info.active"), name = record.name),
        );
        self.terminal.say(
            Tone::Dim,
            &format!(t!("session.info.directory"), path = activation.root.display()),
        );
        self.terminal.say(Tone::Dim, t!("session.info.switch_hint"));

        self.state.set_active(record.clone());
        Phase::Active(Box::new(activation))
    }

    /// The nested prompt of an active environment. Returns when the user switches,
    /// exits, or input ends.
    fn run_active(&mut self, activation: &Activation) -> Result<Phase> {
        let prompt = format!(t!("session.prompt"), name = activation.record.name);
        loop {
            let Some(line) = self.terminal.read_line(&prompt)? else {
                self.state.finish_active();
                return Ok(Phase::Exiting);
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let Some(tokens) = shlex::split(line) else {
                self.terminal.say(Tone::Error, t!("session.error.unparsable"));
                continue;
            };

            match activation.proxies.resolve(&tokens) {
                ProxyAction::Switch(target) => {
                    self.state.request_switch(target);
                    return Ok(Phase::Switching);
                }
                ProxyAction::Exit => {
                    self.state.finish_active();
                    return Ok(Phase::Exiting);
                }
                ProxyAction::Forward { executable, args } => {
                    let result =
                        executor::forward(&executable, &args, &activation.root, &activation.env_vars);
                    self.report_command(result);
                }
                ProxyAction::NothingToForward => {
                    self.terminal.say(Tone::Warning, t!("session.warning.no_command"));
                }
                ProxyAction::Unavailable => self.terminal.say(
                    Tone::Warning,
                    &format!(
                        t!("session.warning.unavailable"),
                        executable = self.manager.executable()
                    ),
                ),
                ProxyAction::Unbound => {
                    let result =
                        executor::run_host_command(line, &activation.root, &activation.env_vars);
                    self.report_command(result);
                }
            }
        }
    }

    fn report_command(&mut self, result: Result<executor::Completion, executor::ExecutionError>) {
        let completion = match result {
            Ok(completion) => completion,
            Err(e) => {
                self.terminal.say(Tone::Error, &e.to_string());
                return;
            }
        };
        if completion.interrupted {
            self.terminal.say(Tone::Warning, t!("session.info.interrupted"));
        }
        if !completion.status.success() {
            let code = completion
                .status
                .code()
                .map_or_else(|| t!("session.info.no_exit_code").to_string(), |c| c.to_string());
            self.terminal.say(
                Tone::Dim,
                &format!(t!("session.info.exit_code"), code = code),
            );
        }
    }

    fn switch(&mut self) -> Phase {
        if let Some(record) = self.state.active() {
            log::debug!("Leaving environment '{}'", record.name);
        }
        if self.state.finish_active() {
            log::debug!("Switch requested, returning to the menu");
        }
        self.terminal.start_transcript();
        Phase::MenuDisplay
    }
}
