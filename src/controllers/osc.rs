// src/controllers/osc.rs
// OSC Controller

use crate::pacing::Quality;
use crate::render::RenderRequest;
use log::warn;
use nannou_osc as osc;
use std::error::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum OscCommand {
    SetText(String),
    AppendText(String),
    Replay,
    SetQuality(Quality),
    SetSeed(f64),
    SetSpeed(f64),
    SetFont(String),
    SetLoop(bool),
    SetAnimate(bool),
}

impl OscCommand {
    /// Applies the command to the live render request.
    pub fn apply(self, request: &mut RenderRequest) {
        match self {
            OscCommand::SetText(text) => request.text = text,
            OscCommand::AppendText(text) => request.text.push_str(&text),
            OscCommand::Replay => request.playhead = request.playhead.wrapping_add(1),
            OscCommand::SetQuality(quality) => request.quality = quality,
            OscCommand::SetSeed(seed) => request.seed = seed.into(),
            OscCommand::SetSpeed(speed) => request.speed = speed,
            OscCommand::SetFont(font_ref) => request.font_ref = font_ref,
            OscCommand::SetLoop(setting) => request.auto_replay = setting,
            OscCommand::SetAnimate(setting) => request.animate = setting,
        }
    }
}

fn number(args: &[osc::Type]) -> Option<f64> {
    match args {
        [osc::Type::Float(value)] => Some(*value as f64),
        [osc::Type::Double(value)] => Some(*value),
        [osc::Type::Int(value)] => Some(*value as f64),
        _ => None,
    }
}

fn flag(args: &[osc::Type]) -> Option<bool> {
    match args {
        [osc::Type::Int(setting)] => Some(*setting != 0),
        [osc::Type::Bool(setting)] => Some(*setting),
        _ => None,
    }
}

/// Decodes one message. `None` for unknown addresses or bad arguments.
pub fn parse_message(message: &osc::Message) -> Option<OscCommand> {
    let args = &message.args[..];
    match message.addr.as_str() {
        "/penora/text" => match args {
            [osc::Type::String(text)] => Some(OscCommand::SetText(text.clone())),
            _ => None,
        },
        "/penora/append" => match args {
            [osc::Type::String(text)] => Some(OscCommand::AppendText(text.clone())),
            _ => None,
        },
        "/penora/replay" => Some(OscCommand::Replay),
        "/penora/quality" => match args {
            [osc::Type::String(name)] => Some(OscCommand::SetQuality(Quality::from_name(name))),
            _ => None,
        },
        "/penora/seed" => number(args).map(OscCommand::SetSeed),
        "/penora/speed" => number(args)
            .filter(|speed| speed.is_finite() && *speed > 0.0)
            .map(OscCommand::SetSpeed),
        "/penora/font" => match args {
            [osc::Type::String(font_ref)] => Some(OscCommand::SetFont(font_ref.clone())),
            _ => None,
        },
        "/penora/loop" => flag(args).map(OscCommand::SetLoop),
        "/penora/animate" => flag(args).map(OscCommand::SetAnimate),
        _ => None,
    }
}

pub struct OscController {
    command_queue: Vec<OscCommand>,
    receiver: osc::Receiver,
}

impl OscController {
    pub fn new(port: u16) -> Result<Self, Box<dyn Error>> {
        let receiver = osc::receiver(port)?;

        Ok(Self {
            command_queue: Vec::new(),
            receiver,
        })
    }

    pub fn process_messages(&mut self) {
        for (packet, _addr) in self.receiver.try_iter() {
            for message in packet.into_msgs() {
                match parse_message(&message) {
                    Some(command) => self.command_queue.push(command),
                    None => warn!(
                        "Unhandled OSC message: {} {:?}",
                        message.addr, message.args
                    ),
                }
            }
        }
    }

    pub fn take_commands(&mut self) -> Vec<OscCommand> {
        std::mem::take(&mut self.command_queue)
    }
}

// Loopback sender: keyboard shortcuts go through the same OSC path
// as remote control.
pub struct OscSender {
    sender: osc::Sender,
    target_addr: String,
    target_port: u16,
}

impl OscSender {
    pub fn new(target_port: u16) -> Result<Self, Box<dyn Error>> {
        let target_addr = "127.0.0.1".to_string();
        let sender = osc::sender()?;

        Ok(Self {
            sender,
            target_addr,
            target_port,
        })
    }

    fn send(&self, addr: &str, args: Vec<osc::Type>) {
        self.sender
            .send((addr.to_string(), args), (self.target_addr.as_str(), self.target_port))
            .ok();
    }

    pub fn send_text(&self, text: &str) {
        self.send("/penora/text", vec![osc::Type::String(text.to_string())]);
    }

    pub fn send_append(&self, text: &str) {
        self.send("/penora/append", vec![osc::Type::String(text.to_string())]);
    }

    pub fn send_replay(&self) {
        self.send("/penora/replay", Vec::new());
    }

    pub fn send_quality(&self, quality: Quality) {
        self.send(
            "/penora/quality",
            vec![osc::Type::String(quality.name().to_string())],
        );
    }

    pub fn send_seed(&self, seed: f32) {
        self.send("/penora/seed", vec![osc::Type::Float(seed)]);
    }

    pub fn send_speed(&self, speed: f32) {
        self.send("/penora/speed", vec![osc::Type::Float(speed)]);
    }

    pub fn send_font(&self, font_ref: &str) {
        self.send("/penora/font", vec![osc::Type::String(font_ref.to_string())]);
    }

    pub fn send_loop(&self, setting: bool) {
        self.send("/penora/loop", vec![osc::Type::Int(setting as i32)]);
    }

    pub fn send_animate(&self, setting: bool) {
        self.send("/penora/animate", vec![osc::Type::Int(setting as i32)]);
    }
}
