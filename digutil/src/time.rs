use std::time::Instant;

/// Logs how long each named phase of a run takes. Phases nest; stopping one that isn't the
/// innermost is a bug in the caller and gets logged rather than panicking.
pub struct Timer {
    name: String,
    started_at: Instant,
    stack: Vec<(String, Instant)>,
    results: Vec<(String, f64)>,
}

impl Timer {
    pub fn new<I: Into<String>>(name: I) -> Timer {
        let name = name.into();
        info!("{}...", name);
        Timer {
            name,
            started_at: Instant::now(),
            stack: Vec::new(),
            results: Vec::new(),
        }
    }

    pub fn start<I: Into<String>>(&mut self, name: I) {
        let name = name.into();
        debug!("{}- {}...", "  ".repeat(self.stack.len()), name);
        self.stack.push((name, Instant::now()));
    }

    pub fn stop<I: Into<String>>(&mut self, name: I) {
        let name = name.into();
        match self.stack.pop() {
            Some((top, started)) if top == name => {
                let elapsed = started.elapsed().as_secs_f64();
                info!(
                    "{}- {} took {}",
                    "  ".repeat(self.stack.len()),
                    name,
                    prettyprint_time(elapsed)
                );
                self.results.push((name, elapsed));
            }
            Some((top, started)) => {
                warn!("Timer stopped {} while {} was running", name, top);
                self.stack.push((top, started));
            }
            None => warn!("Timer stopped {}, but nothing was running", name),
        }
    }

    pub fn note<I: Into<String>>(&mut self, line: I) {
        info!("{}", line.into());
    }

    /// Phases that finished, in the order they finished.
    #[cfg(test)]
    fn results(&self) -> &[(String, f64)] {
        &self.results
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        for (name, _) in self.stack.drain(..).rev() {
            debug!("{} never stopped", name);
        }
        debug!(
            "{} took {} total",
            self.name,
            prettyprint_time(self.started_at.elapsed().as_secs_f64())
        );
    }
}

pub fn prettyprint_usize(x: usize) -> String {
    let num = format!("{}", x);
    let mut result = String::new();
    let mut i = num.len();
    for c in num.chars() {
        result.push(c);
        i -= 1;
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
    }
    result
}

fn prettyprint_time(seconds: f64) -> String {
    format!("{:.4}s", seconds)
}
