//! # Mock Host & Testing Guide
//!
//! [`MockHost<T>`] answers [`HostClient<T>`] requests from a queue of expectations instead of
//! real modules. Use it to test code that sits *around* a client (typed wrappers, adapters,
//! orchestration) without deploying anything.
//!
//! | | MockHost | Real ModuleHost |
//! |---|---|---|
//! | **State** | None, scripted responses | Real module state |
//! | **Error injection** | `return_err` | Requires driving the module into that state |
//! | **Use case** | Client and adapter logic | Module rules, full system runs |
//!
//! ## Scripted responses
//!
//! ```rust,ignore
//! let mut mock = MockHost::<Treasury>::new();
//! mock.expect_deployed().return_ok(Some(treasury_address));
//! mock.expect_query(treasury_address).return_ok(TreasuryQueryResult::FinanceDirector(None));
//!
//! let client = TreasuryClient::new(mock.client());
//! // exercise code under test...
//! mock.verify();
//! ```
//!
//! ## Inspecting requests
//!
//! [`create_mock_client`] hands back the raw receiver. Together with [`expect_call`],
//! [`expect_query`] and [`expect_deployed`] a test can assert on the exact payload before
//! answering it.
//!
//! A call or query sent to an address other than the expected one panics the mock task, so the
//! client sees [`HostError::HostDropped`].

use crate::client::HostClient;
use crate::entity::ModuleEntity;
use crate::error::HostError;
use crate::message::HostRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

/// An expected request and the response to give it.
enum Expectation<T: ModuleEntity> {
    Deploy {
        response: Result<T::Address, HostError>,
    },
    Deployed {
        response: Result<Option<T::Address>, HostError>,
    },
    Call {
        address: T::Address,
        response: Result<T::CallResult, HostError>,
    },
    Query {
        address: T::Address,
        response: Result<T::QueryResult, HostError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock host that answers requests in the order expectations were registered.
pub struct MockHost<T: ModuleEntity> {
    client: HostClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ModuleEntity> Default for MockHost<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ModuleEntity> MockHost<T> {
    /// Creates a new mock host with no expectations. Must be called inside a tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<HostRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        HostRequest::Deploy { respond_to, .. },
                        Some(Expectation::Deploy { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        HostRequest::Deployed { respond_to },
                        Some(Expectation::Deployed { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        HostRequest::Call {
                            address,
                            respond_to,
                            ..
                        },
                        Some(Expectation::Call {
                            address: expected,
                            response,
                        }),
                    ) => {
                        if address != expected {
                            panic!("Call sent to {}, expected {}", address, expected);
                        }
                        let _ = respond_to.send(response);
                    }
                    (
                        HostRequest::Query {
                            address,
                            respond_to,
                            ..
                        },
                        Some(Expectation::Query {
                            address: expected,
                            response,
                        }),
                    ) => {
                        if address != expected {
                            panic!("Query sent to {}, expected {}", address, expected);
                        }
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: HostClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> HostClient<T> {
        self.client.clone()
    }

    pub fn expect_deploy(&mut self) -> ResponseBuilder<T, T::Address> {
        ResponseBuilder::new(self.expectations.clone(), |response| Expectation::Deploy {
            response,
        })
    }

    pub fn expect_deployed(&mut self) -> ResponseBuilder<T, Option<T::Address>> {
        ResponseBuilder::new(self.expectations.clone(), |response| {
            Expectation::Deployed { response }
        })
    }

    pub fn expect_call(&mut self, address: T::Address) -> ResponseBuilder<T, T::CallResult> {
        ResponseBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Call { address, response }
        })
    }

    pub fn expect_query(&mut self, address: T::Address) -> ResponseBuilder<T, T::QueryResult> {
        ResponseBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Query { address, response }
        })
    }

    /// Panics if any registered expectation was not consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Completes an expectation with the response to return.
pub struct ResponseBuilder<T: ModuleEntity, R> {
    expectations: Queue<T>,
    make: Box<dyn FnOnce(Result<R, HostError>) -> Expectation<T> + Send>,
}

impl<T: ModuleEntity, R> ResponseBuilder<T, R> {
    fn new(
        expectations: Queue<T>,
        make: impl FnOnce(Result<R, HostError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            expectations,
            make: Box::new(make),
        }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        let expectation = (self.make)(Ok(value));
        self.expectations.lock().unwrap().push_back(expectation);
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: HostError) {
        let expectation = (self.make)(Err(error));
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

/// Creates a client and the receiver its requests arrive on.
pub fn create_mock_client<T: ModuleEntity>(
    buffer_size: usize,
) -> (HostClient<T>, mpsc::Receiver<HostRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (HostClient::new(sender), receiver)
}

/// Next request must be a Call. Returns its parts and the responder.
pub async fn expect_call<T: ModuleEntity>(
    receiver: &mut mpsc::Receiver<HostRequest<T>>,
) -> Option<(
    T::Address,
    T::Address,
    T::Call,
    oneshot::Sender<Result<T::CallResult, HostError>>,
)> {
    match receiver.recv().await {
        Some(HostRequest::Call {
            address,
            caller,
            call,
            respond_to,
        }) => Some((address, caller, call, respond_to)),
        _ => None,
    }
}

/// Next request must be a Query.
pub async fn expect_query<T: ModuleEntity>(
    receiver: &mut mpsc::Receiver<HostRequest<T>>,
) -> Option<(
    T::Address,
    T::Query,
    oneshot::Sender<Result<T::QueryResult, HostError>>,
)> {
    match receiver.recv().await {
        Some(HostRequest::Query {
            address,
            query,
            respond_to,
        }) => Some((address, query, respond_to)),
        _ => None,
    }
}

/// Next request must be a Deployed lookup.
pub async fn expect_deployed<T: ModuleEntity>(
    receiver: &mut mpsc::Receiver<HostRequest<T>>,
) -> Option<oneshot::Sender<Result<Option<T::Address>, HostError>>> {
    match receiver.recv().await {
        Some(HostRequest::Deployed { respond_to }) => Some(respond_to),
        _ => None,
    }
}
