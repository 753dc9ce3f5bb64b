//! Tweakable parameters grouped into folders.

use thiserror::Error;

/// A rejected panel edit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PanelError {
    /// No parameter of that name in the folder.
    #[error("no parameter named `{0}`")]
    UnknownParam(String),

    /// The value is not one of the choice's options.
    #[error("`{value}` is not an option of `{param}`")]
    UnknownOption {
        /// Choice name.
        param: String,
        /// Rejected value.
        value: String,
    },
}

/// A bounded number on some field of `T`.
pub struct NumericParam<T> {
    name: String,
    min: f32,
    max: f32,
    step: Option<f32>,
    get: fn(&T) -> f32,
    set: fn(&mut T, f32),
}

impl<T> NumericParam<T> {
    /// Parameter over `min..=max` read and written through `get`/`set`.
    pub fn new(
        name: impl Into<String>,
        min: f32,
        max: f32,
        get: fn(&T) -> f32,
        set: fn(&mut T, f32),
    ) -> Self {
        Self {
            name: name.into(),
            min: min.min(max),
            max: max.max(min),
            step: None,
            get,
            set,
        }
    }

    /// Slider granularity for front ends. Values are not snapped to it.
    pub fn with_step(mut self, step: f32) -> Self {
        self.step = Some(step);
        self
    }

    /// Name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inclusive range.
    #[inline]
    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    /// Slider granularity.
    #[inline]
    pub fn step(&self) -> Option<f32> {
        self.step
    }

    /// Current value on `target`.
    pub fn get(&self, target: &T) -> f32 {
        (self.get)(target)
    }

    /// Clamp into range and write. Returns the value actually written.
    pub fn set(&self, target: &mut T, value: f32) -> f32 {
        let value = if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        };
        (self.set)(target, value);
        value
    }
}

impl<T> std::fmt::Debug for NumericParam<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NumericParam")
            .field("name", &self.name)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("step", &self.step)
            .finish()
    }
}

/// An applied edit.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamChange {
    /// Parameter name.
    pub name: String,
    /// Value before the edit.
    pub old: f32,
    /// Value written, after clamping.
    pub new: f32,
}

impl ParamChange {
    /// Check if the edit changed anything.
    pub fn changed(&self) -> bool {
        self.old != self.new
    }
}

/// Named group of parameters over the same target type.
#[derive(Debug)]
pub struct ParamFolder<T> {
    title: String,
    params: Vec<NumericParam<T>>,
}

impl<T> ParamFolder<T> {
    /// Empty folder.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            params: Vec::new(),
        }
    }

    /// Add a parameter.
    pub fn add(mut self, param: NumericParam<T>) -> Self {
        self.params.push(param);
        self
    }

    /// Folder title.
    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Parameters in display order.
    #[inline]
    pub fn params(&self) -> &[NumericParam<T>] {
        &self.params
    }

    fn param(&self, name: &str) -> Result<&NumericParam<T>, PanelError> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| PanelError::UnknownParam(name.to_string()))
    }

    /// Read a parameter.
    pub fn get(&self, target: &T, name: &str) -> Result<f32, PanelError> {
        Ok(self.param(name)?.get(target))
    }

    /// Write a parameter, clamped into its range.
    pub fn set(&self, target: &mut T, name: &str, value: f32) -> Result<ParamChange, PanelError> {
        let param = self.param(name)?;
        let old = param.get(target);
        let new = param.set(target, value);
        Ok(ParamChange {
            name: param.name.clone(),
            old,
            new,
        })
    }
}

/// Pick one of several named options.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceParam {
    name: String,
    options: Vec<String>,
    selected: usize,
}

impl ChoiceParam {
    /// Choice starting at `initial`, or at the first option if `initial`
    /// is not among them.
    pub fn new<I, S>(name: impl Into<String>, options: I, initial: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        let selected = options.iter().position(|o| o == initial).unwrap_or(0);
        Self {
            name: name.into(),
            options,
            selected,
        }
    }

    /// Name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All options.
    #[inline]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Current option.
    pub fn selected(&self) -> &str {
        self.options.get(self.selected).map_or("", String::as_str)
    }

    /// Select an option by value.
    pub fn select(&mut self, value: &str) -> Result<&str, PanelError> {
        let index = self
            .options
            .iter()
            .position(|o| o == value)
            .ok_or_else(|| PanelError::UnknownOption {
                param: self.name.clone(),
                value: value.to_string(),
            })?;
        self.selected = index;
        Ok(self.selected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Knob {
        level: f32,
    }

    fn folder() -> ParamFolder<Knob> {
        ParamFolder::new("Knob").add(
            NumericParam::new("level", 0.0, 10.0, |k: &Knob| k.level, |k: &mut Knob, v| k.level = v)
                .with_step(0.5),
        )
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let folder = folder();
        let mut knob = Knob::default();
        let change = folder.set(&mut knob, "level", 42.0).unwrap();
        assert_eq!(change.new, 10.0);
        assert_eq!(knob.level, 10.0);
        assert!(change.changed());

        folder.set(&mut knob, "level", -3.0).unwrap();
        assert_eq!(knob.level, 0.0);
        folder.set(&mut knob, "level", f32::NAN).unwrap();
        assert_eq!(knob.level, 0.0);
    }

    #[test]
    fn test_unknown_param() {
        let folder = folder();
        let mut knob = Knob::default();
        assert_eq!(
            folder.set(&mut knob, "volume", 1.0),
            Err(PanelError::UnknownParam("volume".into()))
        );
        assert_eq!(folder.params()[0].step(), Some(0.5));
    }

    #[test]
    fn test_choice() {
        let mut choice = ChoiceParam::new("activeCamera", ["main", "debug"], "debug");
        assert_eq!(choice.selected(), "debug");
        assert_eq!(choice.select("main"), Ok("main"));
        assert!(matches!(choice.select("side"), Err(PanelError::UnknownOption { .. })));
        assert_eq!(choice.selected(), "main");
    }
}
