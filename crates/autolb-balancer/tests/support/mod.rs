//! Fakes shared by balancer integration tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use autolb_balancer::LoadBalancerRegistry;
use autolb_core::lb::{
    AddressGroup, Attributes, ChannelLogLevel, Helper, LoadBalancer, LoadBalancerProvider, Subchannel,
    SubchannelPicker,
};
use autolb_core::{ConnectivityState, ConnectivityStateInfo, Result, Status};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Everything observable from outside the balancer, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    State(ConnectivityState),
    Created { policy: String, id: u64 },
    Addresses { policy: String, id: u64, servers: Vec<AddressGroup>, attrs: Attributes },
    ResolutionError { policy: String, id: u64, status: Status },
    SubchannelState { policy: String, id: u64, subchannel: Subchannel, state: ConnectivityState },
    Shutdown { policy: String, id: u64 },
}

#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<Event>>>);

impl Journal {
    pub fn push(&self, e: Event) {
        self.0.lock().unwrap().push(e);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }

    pub fn created(&self) -> Vec<(String, u64)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Created { policy, id } => Some((policy, id)),
                _ => None,
            })
            .collect()
    }

    pub fn shutdowns(&self) -> Vec<(String, u64)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Shutdown { policy, id } => Some((policy, id)),
                _ => None,
            })
            .collect()
    }

    /// Last address update seen by any delegate.
    pub fn last_addresses(&self) -> Option<(String, u64, Vec<AddressGroup>, Attributes)> {
        self.events().into_iter().rev().find_map(|e| match e {
            Event::Addresses { policy, id, servers, attrs } => Some((policy, id, servers, attrs)),
            _ => None,
        })
    }
}

pub struct RecordingHelper {
    journal: Journal,
    pickers: Mutex<Vec<(ConnectivityState, Arc<dyn SubchannelPicker>)>>,
    logs: Mutex<Vec<(ChannelLogLevel, String)>>,
}

impl RecordingHelper {
    pub fn new(journal: &Journal) -> Arc<Self> {
        Arc::new(Self {
            journal: journal.clone(),
            pickers: Mutex::new(Vec::new()),
            logs: Mutex::new(Vec::new()),
        })
    }

    pub fn last_picker(&self) -> Option<(ConnectivityState, Arc<dyn SubchannelPicker>)> {
        self.pickers.lock().unwrap().last().cloned()
    }

    pub fn states(&self) -> Vec<ConnectivityState> {
        self.pickers.lock().unwrap().iter().map(|(s, _)| *s).collect()
    }

    pub fn logs_at(&self, level: ChannelLogLevel) -> Vec<String> {
        self.logs
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Helper for RecordingHelper {
    fn update_balancing_state(&self, state: ConnectivityState, picker: Arc<dyn SubchannelPicker>) {
        self.journal.push(Event::State(state));
        self.pickers.lock().unwrap().push((state, picker));
    }

    fn log(&self, level: ChannelLogLevel, message: &str) {
        self.logs.lock().unwrap().push((level, message.to_string()));
    }
}

pub struct FakeProvider {
    name: String,
    journal: Journal,
    accepts_empty: bool,
}

impl FakeProvider {
    pub fn new(name: &str, journal: &Journal) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            journal: journal.clone(),
            accepts_empty: false,
        })
    }

    pub fn accepting_empty(name: &str, journal: &Journal) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            journal: journal.clone(),
            accepts_empty: true,
        })
    }
}

impl LoadBalancerProvider for FakeProvider {
    fn policy_name(&self) -> &str {
        &self.name
    }

    fn new_load_balancer(&self, _helper: Arc<dyn Helper>) -> Box<dyn LoadBalancer> {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        self.journal.push(Event::Created { policy: self.name.clone(), id });
        Box::new(FakeBalancer {
            policy: self.name.clone(),
            id,
            journal: self.journal.clone(),
            accepts_empty: self.accepts_empty,
        })
    }
}

pub struct FakeBalancer {
    policy: String,
    id: u64,
    journal: Journal,
    accepts_empty: bool,
}

impl LoadBalancer for FakeBalancer {
    fn handle_resolved_addresses(&mut self, servers: Vec<AddressGroup>, attrs: Attributes) -> Result<()> {
        self.journal.push(Event::Addresses {
            policy: self.policy.clone(),
            id: self.id,
            servers,
            attrs,
        });
        Ok(())
    }

    fn handle_name_resolution_error(&mut self, error: Status) {
        self.journal.push(Event::ResolutionError {
            policy: self.policy.clone(),
            id: self.id,
            status: error,
        });
    }

    fn handle_subchannel_state(&mut self, subchannel: Subchannel, state: ConnectivityStateInfo) {
        self.journal.push(Event::SubchannelState {
            policy: self.policy.clone(),
            id: self.id,
            subchannel,
            state: state.state,
        });
    }

    fn can_handle_empty_address_list(&self) -> bool {
        self.accepts_empty
    }

    fn shutdown(&mut self) {
        self.journal.push(Event::Shutdown {
            policy: self.policy.clone(),
            id: self.id,
        });
    }
}

pub fn registry_with(journal: &Journal, policies: &[&str]) -> Arc<LoadBalancerRegistry> {
    let reg = Arc::new(LoadBalancerRegistry::new());
    for p in policies {
        reg.register(FakeProvider::new(p, journal));
    }
    reg
}

pub fn backend(port: u16) -> AddressGroup {
    AddressGroup::single(SocketAddr::from(([10, 0, 0, 1], port)))
}

pub fn balancer(port: u16) -> AddressGroup {
    AddressGroup::balancer(SocketAddr::from(([10, 0, 0, 2], port)), "lb.example.com")
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
