/// Outcome of a mandatory scan.
///
/// Holds the labels of the elements that must appear, in order, before the
/// first point of uncertainty, and whether the scan stopped at such a point.
/// A scan that walked the whole rule without meeting an optional, repeatable
/// or ambiguous construct is *not* stopped: everything it lists is the entire
/// guaranteed content.
///
/// Stopped scans are terminal. Values are only built by [`MandatoryScan::new`]
/// and [`MandatoryScan::stop`], and [`MandatoryScan::then`] never extends a
/// stopped scan.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MandatoryScan {
    mandatories: Vec<String>,
    stopped: bool,
}

impl MandatoryScan {
    #[inline]
    pub fn new(mandatories: Vec<String>, stopped: bool) -> Self {
        Self {
            mandatories,
            stopped,
        }
    }

    /// The empty, stopped scan.
    #[inline]
    pub const fn stop() -> Self {
        Self {
            mandatories: Vec::new(),
            stopped: true,
        }
    }

    #[inline]
    pub fn mandatories(&self) -> &[String] {
        &self.mandatories
    }

    #[inline]
    pub fn into_mandatories(self) -> Vec<String> {
        self.mandatories
    }

    #[inline]
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Continues an unstopped scan with `next`.
    ///
    /// The mandatories of `next` are appended and its stop flag carried over.
    /// A stopped scan is returned unchanged and `next` is not evaluated.
    pub fn then(mut self, next: impl FnOnce() -> MandatoryScan) -> Self {
        if self.stopped {
            return self;
        }
        let next = next();
        self.mandatories.extend(next.mandatories);
        self.stopped = next.stopped;
        self
    }

    /// Marks the scan as stopped, keeping what was gathered so far.
    #[inline]
    pub fn stopped(mut self) -> Self {
        self.stopped = true;
        self
    }
}
