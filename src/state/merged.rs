/// A value that is either driven from outside or held internally.
///
/// While controlled, reads return the external value and writes land in the
/// internal slot, where the next external update (or releasing control)
/// overwrites them.
#[derive(Clone, Debug)]
pub struct MergedState<T> {
    inner: T,
    controlled: Option<T>,
}

impl<T: Clone> MergedState<T> {
    pub fn new(default: T) -> Self {
        MergedState {
            inner: default,
            controlled: None,
        }
    }

    pub fn with_controlled(default: T, controlled: Option<T>) -> Self {
        let mut state = MergedState::new(default);
        state.control(controlled);
        state
    }

    pub fn get(&self) -> &T {
        self.controlled.as_ref().unwrap_or(&self.inner)
    }

    pub fn set(&mut self, value: T) {
        self.inner = value;
    }

    pub fn is_controlled(&self) -> bool {
        self.controlled.is_some()
    }

    /// Applies an external update. `None` releases control and keeps the
    /// last external value as the internal one.
    pub fn control(&mut self, value: Option<T>) {
        match value {
            Some(v) => {
                self.inner = v.clone();
                self.controlled = Some(v);
            }
            None => {
                if let Some(last) = self.controlled.take() {
                    self.inner = last;
                }
            }
        }
    }
}
