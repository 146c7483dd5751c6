use std::rc::Rc;

use once_cell::sync::Lazy;
use regex::Regex;

use duonav_common::{
    Bundle, NavDestination, NavError, NavOptions, NavValue, Navigator, NavigatorExtras, Result,
};

use crate::host::TaskHost;
use crate::intent::{IntentFlags, TaskIntent};

pub const TASK_NAVIGATOR_NAME: &str = "task";

static FILL_IN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(.+?)\}").expect("fill-in pattern is valid"));

/// Navigator for destinations living in another task. Launching one hands a
/// [`TaskIntent`] to the host and never pushes a back-stack entry; popping
/// back across the task boundary finishes the hosting window.
pub struct TaskNavigator {
    host: Rc<dyn TaskHost>,
}

impl TaskNavigator {
    pub fn new(host: Rc<dyn TaskHost>) -> Self {
        Self { host }
    }

    /// Substitute `{name}` segments of the data pattern from the argument
    /// bundle.
    fn fill_data_pattern(pattern: &str, args: Option<&Bundle>) -> Result<String> {
        let mut data = String::new();
        let mut last_end = 0;
        for capture in FILL_IN_PATTERN.captures_iter(pattern) {
            let whole = capture.get(0).expect("capture 0 always present");
            let arg_name = &capture[1];
            let value = args.and_then(|args| args.get(arg_name)).ok_or_else(|| {
                NavError::invalid_argument(format!(
                    "could not find \"{arg_name}\" in {args:?} to fill data pattern {pattern}"
                ))
            })?;
            data.push_str(&pattern[last_end..whole.start()]);
            data.push_str(&value_as_string(value));
            last_end = whole.end();
        }
        data.push_str(&pattern[last_end..]);
        Ok(data)
    }
}

fn value_as_string(value: &NavValue) -> String {
    match value {
        NavValue::Bool(v) => v.to_string(),
        NavValue::Int(v) => v.to_string(),
        NavValue::Float(v) => v.to_string(),
        NavValue::Str(v) => v.clone(),
    }
}

impl Navigator for TaskNavigator {
    fn name(&self) -> &str {
        TASK_NAVIGATOR_NAME
    }

    fn create_destination(&self) -> Rc<NavDestination> {
        NavDestination::new(TASK_NAVIGATOR_NAME)
    }

    fn navigate(
        &self,
        destination: &Rc<NavDestination>,
        args: Option<Bundle>,
        _options: Option<&NavOptions>,
        _extras: Option<&dyn NavigatorExtras>,
    ) -> Result<Option<Rc<NavDestination>>> {
        let component = destination.component().ok_or_else(|| {
            NavError::invalid_state(format!(
                "task destination {destination} does not have a component set"
            ))
        })?;
        let data = destination
            .data_pattern()
            .map(|pattern| Self::fill_data_pattern(&pattern, args.as_ref()))
            .transpose()?;
        self.host.start_task(TaskIntent {
            component,
            data,
            args,
            flags: IntentFlags::NEW_TASK,
        });
        // The launched task lives outside this controller's back stack.
        Ok(None)
    }

    fn pop_back_stack(&self, _with_transition: bool) -> bool {
        self.host.finish();
        true
    }
}
