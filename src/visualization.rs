//! Visualizations that display one variable of a dataset at a time.
//!
//! Each visualization handles a single [`VariableKind`]. Front ends list the
//! variables a visualization can show with [`selectable_variables`] and hand
//! the user's choice over with [`select_variable`].

use crate::data::{QesReader, Variable, VariableKind};
use crate::error::{QesError, Result};
use std::fmt::Debug;

/// A consumer that renders one variable of the loaded dataset.
pub trait Visualization: Debug {
    /// Short, user-facing name.
    fn name(&self) -> &str;

    /// Kind of variable this visualization can display.
    fn variable_kind(&self) -> VariableKind;

    /// Name of the variable being displayed, if any.
    fn current_variable(&self) -> Option<&str>;

    /// Display the variable `name` from now on.
    fn set_current_variable(&mut self, name: &str);
}

/// Variables offered for one visualization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VariableChoices {
    /// Names of the variables of the visualization's kind, in manifest order.
    pub names: Vec<String>,
    /// Index in `names` of the current variable.
    pub selected: Option<usize>,
}

/// Variables of `reader` that `visualization` can display.
pub fn selectable_variables(
    reader: &QesReader,
    visualization: &dyn Visualization,
) -> VariableChoices {
    let names: Vec<String> = reader
        .variables_of_kind(visualization.variable_kind())
        .map(|v| v.name.clone())
        .collect();
    let selected = visualization
        .current_variable()
        .and_then(|current| names.iter().position(|n| n == current));
    VariableChoices { names, selected }
}

/// Make `visualization` display the variable `name` of `reader`.
///
/// Fails with a lookup error if the variable does not exist or is of a
/// kind the visualization cannot show; the selection is then unchanged.
pub fn select_variable(
    reader: &QesReader,
    visualization: &mut dyn Visualization,
    name: &str,
) -> Result<()> {
    checked_kind(reader.variable(name)?, visualization.variable_kind())?;
    tracing::debug!(
        visualization = visualization.name(),
        variable = name,
        "Select variable"
    );
    visualization.set_current_variable(name);
    Ok(())
}

/// Metadata of the variable `visualization` currently displays.
pub fn current_variable<'r>(
    reader: &'r QesReader,
    visualization: &dyn Visualization,
) -> Result<&'r Variable> {
    let name = visualization
        .current_variable()
        .ok_or_else(|| QesError::NoVariableSelected {
            visualization: visualization.name().to_string(),
        })?;
    checked_kind(reader.variable(name)?, visualization.variable_kind())
}

fn checked_kind(variable: &Variable, kind: VariableKind) -> Result<&Variable> {
    if variable.kind != kind {
        return Err(QesError::WrongVariableKind {
            name: variable.name.clone(),
            expected: kind.name(),
        });
    }
    Ok(variable)
}
