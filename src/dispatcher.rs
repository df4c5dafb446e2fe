//! Named event registry.
//!
//! Listeners are called synchronously, in registration order, with the event
//! name and an optional JSON payload.

use std::collections::HashMap;

use bevy::prelude::*;
use serde_json::Value;

const EVENT_PREFIX: &str = "on_";

pub type Listener = Box<dyn Fn(&str, Option<&Value>) + Send + Sync>;

/// Handle returned by [`EventDispatcher::register`], used to unregister one listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Resource, Default)]
pub struct EventDispatcher {
    listeners: HashMap<String, Vec<(ListenerId, Listener)>>,
    next_id: u64,
}

fn event_key(name: &str) -> String {
    format!("{EVENT_PREFIX}{name}")
}

impl EventDispatcher {
    pub fn register(
        &mut self,
        name: &str,
        callback: impl Fn(&str, Option<&Value>) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(event_key(name))
            .or_default()
            .push((id, Box::new(callback)));
        id
    }

    /// Remove one listener, or every listener of the event when `id` is `None`
    pub fn unregister(&mut self, name: &str, id: Option<ListenerId>) {
        let key = event_key(name);
        match id {
            None => {
                self.listeners.remove(&key);
            }
            Some(id) => {
                if let Some(list) = self.listeners.get_mut(&key) {
                    list.retain(|(listener_id, _)| *listener_id != id);
                    if list.is_empty() {
                        self.listeners.remove(&key);
                    }
                }
            }
        }
    }

    pub fn emit(&self, name: &str, params: Option<&Value>) {
        let Some(list) = self.listeners.get(&event_key(name)) else {
            return;
        };
        debug!("geodrawer: emitting {} to {} listener(s)", name, list.len());
        for (_, callback) in list {
            callback(name, params);
        }
    }

    pub fn listener_count(&self, name: &str) -> usize {
        self.listeners.get(&event_key(name)).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) -> Listener) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let make = {
            let log = log.clone();
            move |tag: &str| -> Listener {
                let log = log.clone();
                let tag = tag.to_string();
                Box::new(move |name: &str, _: Option<&Value>| {
                    log.lock().unwrap().push(format!("{tag}:{name}"));
                })
            }
        };
        (log, make)
    }

    #[test]
    fn test_emit_in_registration_order() {
        let (log, make) = recorder();
        let mut dispatcher = EventDispatcher::default();
        dispatcher.register("ready", make("a"));
        dispatcher.register("ready", make("b"));
        dispatcher.register("other", make("c"));

        dispatcher.emit("ready", None);
        assert_eq!(*log.lock().unwrap(), vec!["a:ready", "b:ready"]);
    }

    #[test]
    fn test_emit_without_listeners_is_noop() {
        let dispatcher = EventDispatcher::default();
        dispatcher.emit("nobody", None);
        assert_eq!(dispatcher.listener_count("nobody"), 0);
    }

    #[test]
    fn test_unregister_one_listener() {
        let (log, make) = recorder();
        let mut dispatcher = EventDispatcher::default();
        let first = dispatcher.register("ready", make("a"));
        dispatcher.register("ready", make("b"));

        dispatcher.unregister("ready", Some(first));
        dispatcher.emit("ready", None);
        assert_eq!(*log.lock().unwrap(), vec!["b:ready"]);
    }

    #[test]
    fn test_unregister_all_listeners() {
        let (log, make) = recorder();
        let mut dispatcher = EventDispatcher::default();
        dispatcher.register("ready", make("a"));
        dispatcher.register("ready", make("b"));

        dispatcher.unregister("ready", None);
        dispatcher.emit("ready", None);
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(dispatcher.listener_count("ready"), 0);
    }

    #[test]
    fn test_params_are_passed_through() {
        let seen = Arc::new(Mutex::new(None));
        let mut dispatcher = EventDispatcher::default();
        {
            let seen = seen.clone();
            dispatcher.register("exported", move |_, params| {
                *seen.lock().unwrap() = params.cloned();
            });
        }

        dispatcher.emit("exported", Some(&serde_json::json!({"point": []})));
        assert_eq!(
            *seen.lock().unwrap(),
            Some(serde_json::json!({"point": []}))
        );
    }
}
