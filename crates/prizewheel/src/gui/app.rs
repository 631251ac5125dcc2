use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::form::{FormFields, Nav, Step, Stepper, SubmitFlow, Submission};
use crate::gui::theme;
use crate::gui::wheel_view::{self, WheelView};
use crate::sys::upload::UploadRequest;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::path::PathBuf;
use wheel::Label;

pub struct AppModel {
    stepper: Stepper,
    fields: FormFields,
    config: Config,
    config_path: PathBuf,
    wheel: Option<WheelView>,
    submit: SubmitFlow,
    confirmation: Option<String>,
    error: Option<String>,
    upload_tx: async_channel::Sender<UploadRequest>,
}

#[derive(Debug)]
pub enum AppMsg {
    Name(String),
    Email(String),
    Phone(String),
    Words(String),
    Navigate(Nav),
    Submit,
    Settled(Label),
    Resize(i32, i32),
    ConfigReload,
    Uploaded(Submission),
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
            AppEvent::Uploaded(s) => AppMsg::Uploaded(s),
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        Config,
        PathBuf,
        async_channel::Sender<UploadRequest>,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("Prize Wheel"),
            set_default_width: 480,

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 12,
                set_margin_all: 18,

                gtk::Label {
                    add_css_class: "step-title",
                    set_halign: gtk::Align::Start,
                    #[watch]
                    set_label: &model.stepper.current().to_string(),
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 6,
                    #[watch]
                    set_visible: model.stepper.current() == Step::Details,

                    gtk::Entry {
                        set_placeholder_text: Some("Name"),
                        connect_changed[sender] => move |e| {
                            sender.input(AppMsg::Name(e.text().to_string()));
                        }
                    },
                    gtk::Entry {
                        set_placeholder_text: Some("Email"),
                        set_input_purpose: gtk::InputPurpose::Email,
                        connect_changed[sender] => move |e| {
                            sender.input(AppMsg::Email(e.text().to_string()));
                        }
                    },
                    gtk::Entry {
                        set_placeholder_text: Some("Phone"),
                        set_input_purpose: gtk::InputPurpose::Phone,
                        connect_changed[sender] => move |e| {
                            sender.input(AppMsg::Phone(e.text().to_string()));
                        }
                    },
                },

                gtk::Entry {
                    set_placeholder_text: Some("Prizes, separated by spaces"),
                    set_text: &model.fields.words,
                    #[watch]
                    set_visible: model.stepper.current() == Step::Words,
                    connect_changed[sender] => move |e| {
                        sender.input(AppMsg::Words(e.text().to_string()));
                    }
                },

                #[name = "wheel_mount"]
                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_vexpand: true,
                    #[watch]
                    set_visible: model.stepper.current() == Step::Spin,
                },

                gtk::Label {
                    add_css_class: "form-error",
                    set_halign: gtk::Align::Start,
                    #[watch]
                    set_visible: model.error.is_some(),
                    #[watch]
                    set_label: model.error.as_deref().unwrap_or_default(),
                },

                gtk::Label {
                    set_wrap: true,
                    #[watch]
                    set_visible: model.confirmation.is_some(),
                    #[watch]
                    set_label: model.confirmation.as_deref().unwrap_or_default(),
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Horizontal,
                    set_spacing: 6,
                    set_halign: gtk::Align::End,
                    #[watch]
                    set_visible: !model.submit.is_submitted(),

                    gtk::Button {
                        set_label: "Back",
                        #[watch]
                        set_sensitive: model.stepper.current() != Step::Details,
                        connect_clicked => AppMsg::Navigate(Nav::Previous),
                    },
                    gtk::Button {
                        set_label: "Next",
                        #[watch]
                        set_visible: model.stepper.current() != Step::Spin,
                        connect_clicked => AppMsg::Navigate(Nav::Next),
                    },
                    gtk::Button {
                        set_label: "Spin",
                        add_css_class: "suggested-action",
                        #[watch]
                        set_visible: model.stepper.current() == Step::Spin,
                        connect_clicked => AppMsg::Submit,
                    },
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, config_path, upload_tx, rx) = init;

        theme::load_css();

        let fields = FormFields {
            words: config.labels_text(),
            ..FormFields::default()
        };

        let model = AppModel {
            stepper: Stepper::default(),
            fields,
            config,
            config_path,
            wheel: None,
            submit: SubmitFlow::default(),
            confirmation: None,
            error: None,
            upload_tx,
        };

        let widgets = view_output!();

        let mut model = model;
        let settle_sender = sender.clone();
        match WheelView::mount(Some(&widgets.wheel_mount), &model.config, move |label| {
            settle_sender.input(AppMsg::Settled(label));
        }) {
            Ok(view) => model.wheel = Some(view),
            Err(e) => log::error!("Failed to mount wheel: {}", e),
        }

        let resize_sender = sender.clone();
        root.connect_default_width_notify(move |window| {
            resize_sender.input(AppMsg::Resize(window.default_width(), window.default_height()));
        });
        let resize_sender = sender.clone();
        root.connect_default_height_notify(move |window| {
            resize_sender.input(AppMsg::Resize(window.default_width(), window.default_height()));
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Name(name) => {
                self.fields.name = name;
                self.error = None;
            }
            AppMsg::Email(email) => {
                self.fields.email = email;
                self.error = None;
            }
            AppMsg::Phone(phone) => {
                self.fields.phone = phone;
                self.error = None;
            }
            AppMsg::Words(words) => {
                self.fields.words = words;
                self.error = None;
                if let Some(view) = &self.wheel
                    && let Err(e) = view.set_labels(self.fields.labels())
                {
                    log::error!("Failed to redraw wheel: {}", e);
                }
            }
            AppMsg::Navigate(nav) => match self.stepper.navigate(nav, &self.fields) {
                Ok(step) => {
                    log::debug!("Showing step '{}'", step);
                    self.error = None;
                }
                Err(e) => self.error = Some(e.to_string()),
            },
            AppMsg::Submit => {
                let Some(view) = &self.wheel else {
                    self.error = Some("The wheel is not available".to_string());
                    return;
                };
                match self.submit.submit(&self.fields) {
                    Ok(false) => return,
                    Ok(true) => {}
                    Err(e) => {
                        self.error = Some(e.to_string());
                        return;
                    }
                }

                view.set_locked(true);
                if let Err(e) = view.spin(fastrand::f64()) {
                    log::error!("Failed to spin: {}", e);
                    view.set_locked(false);
                    self.submit.abort();
                }
            }
            AppMsg::Settled(label) => {
                let Some(submission) = self.submit.settle(&self.fields, label) else {
                    return;
                };
                match &self.config.endpoint {
                    Some(endpoint) => {
                        let request = UploadRequest {
                            endpoint: endpoint.clone(),
                            submission,
                        };
                        if let Err(e) = self.upload_tx.try_send(request) {
                            log::error!("Failed to queue upload: {}", e);
                        }
                    }
                    None => {
                        log::warn!("No endpoint configured, submission kept local");
                        self.confirmation = Some(submission.confirmation());
                    }
                }
            }
            AppMsg::Resize(width, height) => {
                if let Some(side) = wheel_view::wheel_side(width, height)
                    && let Some(view) = &self.wheel
                    && let Err(e) = view.update_dimensions(side, side)
                {
                    log::error!("Failed to resize wheel: {}", e);
                }
            }
            AppMsg::Uploaded(submission) => {
                self.confirmation = Some(submission.confirmation());
            }
            AppMsg::ConfigReload => match config::load_config(&self.config_path) {
                Ok(new_config) => {
                    if new_config.wheel != self.config.wheel
                        && let Some(view) = &self.wheel
                        && let Err(e) = view.update_dimensions(
                            new_config.wheel.width as f64,
                            new_config.wheel.height as f64,
                        )
                    {
                        log::error!("Failed to resize wheel: {}", e);
                    }
                    self.config = new_config;
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}
