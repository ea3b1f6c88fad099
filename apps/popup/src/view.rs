use posting::JobPosting;

/// Output surface of the popup. `PopupView` calls these in state order.
pub trait Renderer {
    fn notice(&mut self, message: &str);
    fn job(&mut self, posting: &JobPosting);
    fn description(&mut self, text: &str);
    fn prediction_started(&mut self);
    fn fragment(&mut self, text: &str);
    fn cached(&mut self, text: &str);
    fn error(&mut self, message: &str);
    fn prediction_finished(&mut self);
}

/// Displayed state of the popup: the prediction text as it grows and the busy
/// flag that stands in for the disabled button.
pub struct PopupView<R: Renderer> {
    prediction: String,
    busy: bool,
    from_cache: bool,
    error: Option<String>,
    renderer: R,
}

impl<R: Renderer> PopupView<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            prediction: String::new(),
            busy: false,
            from_cache: false,
            error: None,
            renderer,
        }
    }

    pub fn prediction(&self) -> &str {
        &self.prediction
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_from_cache(&self) -> bool {
        self.from_cache
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[cfg(test)]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn show_notice(&mut self, message: &str) {
        self.renderer.notice(message);
    }

    /// Shows a freshly fetched job and clears any previous prediction.
    pub fn show_job(&mut self, posting: &JobPosting) {
        self.clear_prediction();
        self.renderer.job(posting);
    }

    /// Shows the posting's description, if it has one.
    pub fn show_description(&mut self, posting: &JobPosting) {
        if let Some(text) = posting.description() {
            self.renderer.description(text.trim());
        }
    }

    pub fn begin_prediction(&mut self) {
        self.clear_prediction();
        self.busy = true;
        self.renderer.prediction_started();
    }

    pub fn append(&mut self, fragment: &str) {
        self.prediction.push_str(fragment);
        self.renderer.fragment(fragment);
    }

    /// Replaces the prediction with a stored result in one step.
    pub fn show_cached(&mut self, text: &str) {
        self.clear_prediction();
        self.prediction.push_str(text);
        self.from_cache = true;
        self.renderer.cached(text);
    }

    /// Already-rendered partial text stays on screen.
    pub fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
        self.renderer.error(message);
    }

    pub fn end_prediction(&mut self) {
        self.busy = false;
        self.renderer.prediction_finished();
    }

    fn clear_prediction(&mut self) {
        self.prediction.clear();
        self.from_cache = false;
        self.error = None;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum Event {
        Notice(String),
        Job(String),
        Description(String),
        Started,
        Fragment(String),
        Cached(String),
        Error(String),
        Finished,
    }

    /// Records every render call for assertions on ordering.
    #[derive(Default)]
    pub(crate) struct RecordingRenderer {
        pub events: Vec<Event>,
    }

    impl Renderer for RecordingRenderer {
        fn notice(&mut self, message: &str) {
            self.events.push(Event::Notice(message.to_string()));
        }

        fn job(&mut self, posting: &JobPosting) {
            self.events.push(Event::Job(posting.title.clone()));
        }

        fn description(&mut self, text: &str) {
            self.events.push(Event::Description(text.to_string()));
        }

        fn prediction_started(&mut self) {
            self.events.push(Event::Started);
        }

        fn fragment(&mut self, text: &str) {
            self.events.push(Event::Fragment(text.to_string()));
        }

        fn cached(&mut self, text: &str) {
            self.events.push(Event::Cached(text.to_string()));
        }

        fn error(&mut self, message: &str) {
            self.events.push(Event::Error(message.to_string()));
        }

        fn prediction_finished(&mut self) {
            self.events.push(Event::Finished);
        }
    }

    #[test]
    fn test_prediction_lifecycle() {
        let mut view = PopupView::new(RecordingRenderer::default());

        view.begin_prediction();
        assert!(view.is_busy());
        view.append("$1");
        view.append("00k");
        assert_eq!(view.prediction(), "$100k");
        view.end_prediction();

        assert!(!view.is_busy());
        assert_eq!(
            view.renderer().events,
            vec![
                Event::Started,
                Event::Fragment("$1".to_string()),
                Event::Fragment("00k".to_string()),
                Event::Finished,
            ]
        );
    }

    #[test]
    fn test_error_keeps_partial_text() {
        let mut view = PopupView::new(RecordingRenderer::default());

        view.begin_prediction();
        view.append("partial");
        view.show_error("Prediction failed");
        view.end_prediction();

        assert_eq!(view.prediction(), "partial");
        assert_eq!(view.error(), Some("Prediction failed"));
        assert!(!view.is_busy());
    }

    #[test]
    fn test_new_job_resets_prediction() {
        let mut view = PopupView::new(RecordingRenderer::default());
        view.show_cached("old estimate");

        view.show_job(&JobPosting {
            title: "Nurse".to_string(),
            ..Default::default()
        });

        assert_eq!(view.renderer().events.last(), Some(&Event::Job("Nurse".to_string())));
        assert_eq!(view.prediction(), "");
        assert!(!view.is_from_cache());
    }

    #[test]
    fn test_description_prefers_plain_text_and_skips_empty() {
        let mut view = PopupView::new(RecordingRenderer::default());

        view.show_description(&JobPosting {
            title: "Nurse".to_string(),
            description_plain: Some("  Night shifts.\n".to_string()),
            description_html: Some("<p>Night shifts.</p>".to_string()),
            ..Default::default()
        });
        view.show_description(&JobPosting {
            title: "Nurse".to_string(),
            description_plain: Some(String::new()),
            ..Default::default()
        });

        assert_eq!(
            view.renderer().events,
            vec![Event::Description("Night shifts.".to_string())]
        );
    }
}
