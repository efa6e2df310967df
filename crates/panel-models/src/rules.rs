//! Threshold advisories evaluated over derived values.

/// One advisory rule: emits a message when its predicate holds.
pub struct Rule<T> {
    name: &'static str,
    check: Box<dyn Fn(&T) -> Option<String> + Send + Sync>,
}

impl<T> Rule<T> {
    pub fn new<F>(name: &'static str, check: F) -> Self
    where
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            name,
            check: Box::new(check),
        }
    }

    /// Fires when `value(subject) < threshold`.
    pub fn below<V, M>(name: &'static str, threshold: f64, value: V, advice: M) -> Self
    where
        V: Fn(&T) -> f64 + Send + Sync + 'static,
        M: Fn(f64) -> String + Send + Sync + 'static,
    {
        Self::new(name, move |s| {
            let v = value(s);
            (v < threshold).then(|| advice(v))
        })
    }

    /// Fires when `value(subject) > threshold`.
    pub fn above<V, M>(name: &'static str, threshold: f64, value: V, advice: M) -> Self
    where
        V: Fn(&T) -> f64 + Send + Sync + 'static,
        M: Fn(f64) -> String + Send + Sync + 'static,
    {
        Self::new(name, move |s| {
            let v = value(s);
            (v > threshold).then(|| advice(v))
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Ordered rules plus the message used when none fires.
pub struct RuleSet<T> {
    rules: Vec<Rule<T>>,
    fallback: &'static str,
}

impl<T> RuleSet<T> {
    pub fn new(fallback: &'static str) -> Self {
        Self {
            rules: Vec::new(),
            fallback,
        }
    }

    pub fn with(mut self, rule: Rule<T>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// All matching advisories in declaration order; never empty.
    pub fn evaluate(&self, subject: &T) -> Vec<String> {
        let mut out: Vec<String> = self.rules.iter().filter_map(|r| (r.check)(subject)).collect();
        if out.is_empty() {
            out.push(self.fallback.to_string());
        }
        out
    }
}
