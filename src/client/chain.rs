//! Decorator composition.

use std::sync::Arc;

use crate::client::sender::BoxSender;

/// Wraps an inner sender in a new sender with added behaviour.
///
/// Cheap to clone; the same decorator can be applied to many chains.
#[derive(Clone)]
pub struct Decorator {
    wrap: Arc<dyn Fn(BoxSender) -> BoxSender + Send + Sync>,
}

impl Decorator {
    pub fn new<F>(wrap: F) -> Self
    where
        F: Fn(BoxSender) -> BoxSender + Send + Sync + 'static,
    {
        Self { wrap: Arc::new(wrap) }
    }

    /// Wrap `inner`, returning the outer sender.
    pub fn apply(&self, inner: BoxSender) -> BoxSender {
        (self.wrap)(inner)
    }
}

impl std::fmt::Debug for Decorator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Decorator")
    }
}

/// Decorate `base` with `decorators`.
///
/// The first decorator becomes the outermost layer: `decorate(base, [a, b])`
/// is `a(b(base))`, so a call runs a, then b, then the base sender.
pub fn decorate<I>(base: BoxSender, decorators: I) -> BoxSender
where
    I: IntoIterator<Item = Decorator>,
    I::IntoIter: DoubleEndedIterator,
{
    decorators
        .into_iter()
        .rev()
        .fold(base, |inner, decorator| decorator.apply(inner))
}

/// Ordered builder for a decorated sender.
///
/// Layers are listed outermost first, matching [`decorate`].
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    decorators: Vec<Decorator>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer inside every layer added so far.
    pub fn with(mut self, decorator: Decorator) -> Self {
        self.decorators.push(decorator);
        self
    }

    /// Add a layer only when `decorator` is `Some`.
    pub fn with_optional(self, decorator: Option<Decorator>) -> Self {
        match decorator {
            Some(d) => self.with(d),
            None => self,
        }
    }

    pub fn len(&self) -> usize {
        self.decorators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decorators.is_empty()
    }

    /// Wrap `base` in every layer.
    pub fn build(self, base: BoxSender) -> BoxSender {
        decorate(base, self.decorators)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::sender::Sender;
    use crate::http::error::SendResult;
    use crate::http::{Request, Response};
    use async_trait::async_trait;
    use std::sync::Mutex;

    type Log = Arc<Mutex<Vec<String>>>;

    struct Tagged {
        inner: Option<BoxSender>,
        tag: &'static str,
        log: Log,
    }

    #[async_trait]
    impl Sender for Tagged {
        async fn send(&self, request: &mut Request) -> SendResult<Response> {
            let Some(inner) = &self.inner else {
                self.log.lock().unwrap().push(self.tag.to_string());
                return Ok(Response::ok(self.tag));
            };
            self.log.lock().unwrap().push(format!("{}:pre", self.tag));
            let result = inner.send(request).await;
            self.log.lock().unwrap().push(format!("{}:post", self.tag));
            result
        }
    }

    fn base(log: &Log) -> BoxSender {
        Arc::new(Tagged { inner: None, tag: "base", log: log.clone() })
    }

    fn tag(name: &'static str, log: &Log) -> Decorator {
        let log = log.clone();
        Decorator::new(move |inner| {
            Arc::new(Tagged { inner: Some(inner), tag: name, log: log.clone() }) as BoxSender
        })
    }

    async fn call(sender: &BoxSender) {
        let mut request = Request::get("http://localhost/").unwrap();
        sender.send(&mut request).await.unwrap();
    }

    #[tokio::test]
    async fn first_decorator_is_outermost() {
        let log: Log = Arc::default();
        let sender = decorate(base(&log), vec![tag("a", &log), tag("b", &log)]);
        call(&sender).await;

        assert_eq!(
            *log.lock().unwrap(),
            vec!["a:pre", "b:pre", "base", "b:post", "a:post"]
        );
    }

    #[tokio::test]
    async fn decorate_matches_manual_nesting() {
        let composed_log: Log = Arc::default();
        let composed = decorate(
            base(&composed_log),
            vec![tag("a", &composed_log), tag("b", &composed_log)],
        );
        call(&composed).await;

        let nested_log: Log = Arc::default();
        let a = tag("a", &nested_log);
        let b = tag("b", &nested_log);
        let nested = a.apply(b.apply(base(&nested_log)));
        call(&nested).await;

        assert_eq!(*composed_log.lock().unwrap(), *nested_log.lock().unwrap());
    }

    #[tokio::test]
    async fn empty_chain_is_base() {
        let log: Log = Arc::default();
        let sender = decorate(base(&log), Vec::new());
        call(&sender).await;
        assert_eq!(*log.lock().unwrap(), vec!["base"]);
    }

    #[tokio::test]
    async fn pipeline_preserves_order() {
        let log: Log = Arc::default();
        let pipeline = Pipeline::new()
            .with(tag("a", &log))
            .with_optional(None)
            .with_optional(Some(tag("b", &log)));
        assert_eq!(pipeline.len(), 2);

        let sender = pipeline.build(base(&log));
        call(&sender).await;
        assert_eq!(
            *log.lock().unwrap(),
            vec!["a:pre", "b:pre", "base", "b:post", "a:post"]
        );
    }
}
