//! Grey - a headless stand-in for the GUI toolkit scripts import as `grey`
//!
//! Records window and label state instead of drawing it, which is all the
//! interpreter needs to exercise constructors, property setters and methods.

use std::rc::Rc;

use tracing::info;

use super::{HostClass, HostObject, Member};
use crate::value::Value;
use crate::{Error, Result};

/// Module name scripts import
pub const MODULE: &str = "grey";

pub const DEFAULT_TITLE: &str = "TurboSwift Window";
pub const DEFAULT_WIDTH: i64 = 400;
pub const DEFAULT_HEIGHT: i64 = 300;

/// Every class the module exposes
pub fn classes() -> Vec<Rc<dyn HostClass>> {
    vec![Rc::new(GrcClass), Rc::new(LabelClass)]
}

fn no_attribute(class: &str, name: &str) -> Error {
    Error::Host(format!("{} has no attribute '{}'", class, name))
}

fn expect_dimension(class: &str, name: &str, value: &Value) -> Result<i64> {
    value.as_integer().filter(|v| *v >= 0).ok_or_else(|| {
        Error::Host(format!(
            "{}.{} expects a non-negative Integer, got {}",
            class,
            name,
            value.type_name()
        ))
    })
}

// ── GRC (main window) ─────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct GrcClass;

impl HostClass for GrcClass {
    fn name(&self) -> &str {
        "GRC"
    }

    fn construct(&self) -> Result<Box<dyn HostObject>> {
        Ok(Box::new(GrcWindow::default()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrcWindow {
    pub title: String,
    pub width: i64,
    pub height: i64,
    pub visible: bool,
}

impl Default for GrcWindow {
    fn default() -> Self {
        GrcWindow {
            title: DEFAULT_TITLE.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            visible: false,
        }
    }
}

impl HostObject for GrcWindow {
    fn class_name(&self) -> &str {
        "GRC"
    }

    fn member(&self, name: &str) -> Option<Member> {
        match name {
            "title" | "width" | "height" => Some(Member::Property),
            "show" => Some(Member::Method),
            _ => None,
        }
    }

    fn get(&self, name: &str) -> Option<Value> {
        match name {
            "title" => Some(Value::Str(self.title.clone())),
            "width" => Some(Value::Integer(self.width)),
            "height" => Some(Value::Integer(self.height)),
            _ => None,
        }
    }

    fn set(&mut self, name: &str, value: Value) -> Result<()> {
        match name {
            "title" => self.title = value.to_string(),
            "width" => self.width = expect_dimension("GRC", name, &value)?,
            "height" => self.height = expect_dimension("GRC", name, &value)?,
            _ => return Err(no_attribute("GRC", name)),
        }
        Ok(())
    }

    fn invoke(&mut self, name: &str, _args: Vec<Value>) -> Result<Value> {
        match name {
            "show" => {
                self.visible = true;
                info!(
                    title = %self.title,
                    width = self.width,
                    height = self.height,
                    "grey window shown"
                );
                Ok(Value::Null)
            }
            _ => Err(no_attribute("GRC", name)),
        }
    }
}

// ── Label ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct LabelClass;

impl HostClass for LabelClass {
    fn name(&self) -> &str {
        "Label"
    }

    fn construct(&self) -> Result<Box<dyn HostObject>> {
        Ok(Box::new(Label::default()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    pub packed: bool,
}

impl HostObject for Label {
    fn class_name(&self) -> &str {
        "Label"
    }

    fn member(&self, name: &str) -> Option<Member> {
        match name {
            "text" => Some(Member::Property),
            "pack" => Some(Member::Method),
            _ => None,
        }
    }

    fn get(&self, name: &str) -> Option<Value> {
        match name {
            "text" => Some(Value::Str(self.text.clone())),
            _ => None,
        }
    }

    fn set(&mut self, name: &str, value: Value) -> Result<()> {
        match name {
            "text" => {
                self.text = value.to_string();
                Ok(())
            }
            _ => Err(no_attribute("Label", name)),
        }
    }

    fn invoke(&mut self, name: &str, _args: Vec<Value>) -> Result<Value> {
        match name {
            "pack" => {
                self.packed = true;
                info!(text = %self.text, "grey label packed");
                Ok(Value::Null)
            }
            _ => Err(no_attribute("Label", name)),
        }
    }
}
