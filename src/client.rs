//! HTTP client for the budgeting backend's REST API.
//!
//! Provides both async and blocking client variants behind feature flags.
//! Both are generated from one macro and expose the same methods.

/// Base URL of a locally running backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// Generates a backend client (async or blocking) with builder, methods, and
/// tests.
macro_rules! define_client {
    (
        client_name: $client:ident,
        builder_name: $builder:ident,
        http_type: $http_type:ty,
        response_type: $resp_type:ty,
        client_doc: $client_doc:expr,
        builder_doc: $builder_doc:expr,
        $(async_kw: $async_kw:tt,)?
        $(await_kw: $await_ext:tt,)?
        $(send_bound: $send_bound:tt,)?
    ) => {
        #[doc = $builder_doc]
        #[derive(Debug)]
        pub struct $builder {
            /// Base URL override.
            base_url: Option<String>,
            /// Per-request timeout.
            timeout: Option<Duration>,
        }

        impl $builder {
            /// Overrides the base URL (for a remote backend or a mock server).
            #[inline]
            #[must_use]
            pub fn base_url<T: Into<String>>(mut self, url: T) -> Self {
                self.base_url = Some(url.into());
                self
            }

            /// Sets a timeout applied to every request.
            #[inline]
            #[must_use]
            pub const fn timeout(mut self, timeout: Duration) -> Self {
                self.timeout = Some(timeout);
                self
            }

            /// Builds the client.
            ///
            /// # Errors
            ///
            /// Returns [`BudgetError::Url`] if the base URL does not parse,
            /// [`BudgetError::InvalidArgument`] if it cannot carry a path, and
            /// [`BudgetError::Http`] if the HTTP client fails to build.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub fn build(self) -> Result<$client> {
                let raw = self
                    .base_url
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
                let base_url = Url::parse(&raw)?;
                if base_url.cannot_be_a_base() {
                    return Err(BudgetError::InvalidArgument(format!(
                        "base url {raw} cannot carry a path"
                    )));
                }
                tracing::debug!(base_url = %base_url, "building client");

                let mut http_builder = <$http_type>::builder();
                if let Some(timeout) = self.timeout {
                    http_builder = http_builder.timeout(timeout);
                }
                let http = http_builder.build()?;

                Ok($client { http, base_url })
            }
        }

        #[doc = $client_doc]
        #[derive(Debug)]
        pub struct $client {
            /// Underlying HTTP client.
            http: $http_type,
            /// API base URL.
            base_url: Url,
        }

        impl $client {
            /// Creates a new builder for configuring the client.
            #[inline]
            #[must_use]
            pub const fn builder() -> $builder {
                $builder {
                    base_url: None,
                    timeout: None,
                }
            }

            /// Returns the base URL requests are sent to.
            #[inline]
            #[must_use]
            pub const fn base_url(&self) -> &Url {
                &self.base_url
            }

            /// Lists every user record (`GET /users`).
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn users(&self) -> Result<Vec<User>> {
                let url = self.endpoint(&["users"])?;
                self.get_json(url) $( .$await_ext )?
            }

            /// Fetches one user with embedded purchases, deposits and goals
            /// (`GET /api/data/{user_id}`).
            ///
            /// # Errors
            ///
            /// Returns [`BudgetError::Api`] with status 404 if the user does
            /// not exist, or any transport/decoding error.
            #[inline]
            #[tracing::instrument(skip_all, fields(user_id = %user_id))]
            pub $($async_kw)? fn user(&self, user_id: UserId) -> Result<User> {
                let url = self.endpoint(&["api", "data", &user_id.to_string()])?;
                self.get_json(url) $( .$await_ext )?
            }

            /// Fetches a user by login email (`GET /users/email/{email}`).
            ///
            /// # Errors
            ///
            /// Returns [`BudgetError::Api`] with status 404 if no user has
            /// this email, or any transport/decoding error.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn user_by_email(&self, email: &str) -> Result<User> {
                let url = self.endpoint(&["users", "email", email])?;
                self.get_json(url) $( .$await_ext )?
            }

            /// Overwrites a user's current balance
            /// (`PATCH /users/email/{email}`).
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails or the server
            /// returns a non-success status.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn update_balance(
                &self,
                email: &str,
                current_balance: f64,
            ) -> Result<MessageResponse> {
                let url = self.endpoint(&["users", "email", email])?;
                let body = BalanceUpdate { current_balance };
                self.send_json(Method::PATCH, url, &body) $( .$await_ext )?
            }

            /// Lists a user's purchase and income records
            /// (`GET /api/data/purchase/{user_id}`).
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            #[tracing::instrument(skip_all, fields(user_id = %user_id))]
            pub $($async_kw)? fn purchases(&self, user_id: UserId) -> Result<Vec<Transaction>> {
                let url = self.endpoint(&["api", "data", "purchase", &user_id.to_string()])?;
                self.get_json(url) $( .$await_ext )?
            }

            /// Records a purchase or income
            /// (`PATCH /api/data/purchase/{user_id}`).
            ///
            /// # Errors
            ///
            /// Returns [`BudgetError::Api`] if the backend rejects the record
            /// (unknown user, insufficient funds), or any transport error.
            #[inline]
            #[tracing::instrument(skip_all, fields(user_id = %user_id))]
            pub $($async_kw)? fn record_purchase(
                &self,
                user_id: UserId,
                purchase: &NewPurchase,
            ) -> Result<MessageResponse> {
                let url = self.endpoint(&["api", "data", "purchase", &user_id.to_string()])?;
                self.send_json(Method::PATCH, url, purchase) $( .$await_ext )?
            }

            /// Deletes a purchase record
            /// (`DELETE /api/data/purchase/{user_id}`).
            ///
            /// # Errors
            ///
            /// Returns [`BudgetError::Api`] with status 404 if the user or
            /// record does not exist, or any transport error.
            #[inline]
            #[tracing::instrument(skip_all, fields(user_id = %user_id, purchase_id = %purchase_id))]
            pub $($async_kw)? fn delete_purchase(
                &self,
                user_id: UserId,
                purchase_id: TransactionId,
            ) -> Result<MessageResponse> {
                let url = self.endpoint(&["api", "data", "purchase", &user_id.to_string()])?;
                let body = PurchaseDeletion { purchase_id };
                self.send_json(Method::DELETE, url, &body) $( .$await_ext )?
            }

            /// Lists a user's deposits (`GET /api/data/deposit/{user_id}`).
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            #[tracing::instrument(skip_all, fields(user_id = %user_id))]
            pub $($async_kw)? fn deposits(&self, user_id: UserId) -> Result<Vec<Deposit>> {
                let url = self.endpoint(&["api", "data", "deposit", &user_id.to_string()])?;
                self.get_json(url) $( .$await_ext )?
            }

            /// Records a deposit (`PATCH /api/data/deposit/{user_id}`).
            ///
            /// # Errors
            ///
            /// Returns [`BudgetError::Api`] with status 400 for a negative
            /// amount, 404 for an unknown user, or any transport error.
            #[inline]
            #[tracing::instrument(skip_all, fields(user_id = %user_id))]
            pub $($async_kw)? fn record_deposit(
                &self,
                user_id: UserId,
                amount: f64,
            ) -> Result<MessageResponse> {
                let url = self.endpoint(&["api", "data", "deposit", &user_id.to_string()])?;
                let body = NewDeposit {
                    deposit_amount: amount,
                };
                self.send_json(Method::PATCH, url, &body) $( .$await_ext )?
            }

            /// Deletes a deposit (`DELETE /api/data/deposit/{user_id}`).
            ///
            /// # Errors
            ///
            /// Returns [`BudgetError::Api`] with status 404 if the user or
            /// deposit does not exist, or any transport error.
            #[inline]
            #[tracing::instrument(skip_all, fields(user_id = %user_id, deposit_id = %deposit_id))]
            pub $($async_kw)? fn delete_deposit(
                &self,
                user_id: UserId,
                deposit_id: DepositId,
            ) -> Result<MessageResponse> {
                let url = self.endpoint(&["api", "data", "deposit", &user_id.to_string()])?;
                let body = DepositDeletion { deposit_id };
                self.send_json(Method::DELETE, url, &body) $( .$await_ext )?
            }

            /// Lists a user's goals (`GET /users/{user_id}/goals`).
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            #[tracing::instrument(skip_all, fields(user_id = %user_id))]
            pub $($async_kw)? fn goals(&self, user_id: UserId) -> Result<Vec<Goal>> {
                let url = self.endpoint(&["users", &user_id.to_string(), "goals"])?;
                let envelope: GoalsEnvelope = self.get_json(url) $( .$await_ext )? ?;
                Ok(envelope.goals)
            }

            /// Creates a goal (`POST /users/{user_id}/goals`) and returns it as
            /// stored.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            #[tracing::instrument(skip_all, fields(user_id = %user_id))]
            pub $($async_kw)? fn add_goal(&self, user_id: UserId, goal: &NewGoal) -> Result<Goal> {
                let url = self.endpoint(&["users", &user_id.to_string(), "goals"])?;
                let response: GoalResponse =
                    self.send_json(Method::POST, url, goal) $( .$await_ext )? ?;
                Ok(response.goal)
            }

            /// Adds `amount` to a goal's current amount
            /// (`PATCH /users/{user_id}/goals/{goal_id}`) and returns the
            /// updated goal.
            ///
            /// # Errors
            ///
            /// Returns [`BudgetError::Api`] with status 404 if the user or
            /// goal does not exist, or any transport/decoding error.
            #[inline]
            #[tracing::instrument(skip_all, fields(user_id = %user_id, goal_id = %goal_id))]
            pub $($async_kw)? fn add_to_goal(
                &self,
                user_id: UserId,
                goal_id: GoalId,
                amount: f64,
            ) -> Result<Goal> {
                let url = self.endpoint(&[
                    "users",
                    &user_id.to_string(),
                    "goals",
                    &goal_id.to_string(),
                ])?;
                let body = GoalAmountUpdate {
                    amount_to_add: amount,
                };
                let response: GoalResponse =
                    self.send_json(Method::PATCH, url, &body) $( .$await_ext )? ?;
                Ok(response.goal)
            }

            /// Appends percent-encoded path segments to the base URL.
            fn endpoint(&self, segments: &[&str]) -> Result<Url> {
                let mut url = self.base_url.clone();
                {
                    let mut path = url.path_segments_mut().map_err(|()| {
                        BudgetError::InvalidArgument("base url cannot carry a path".to_owned())
                    })?;
                    _ = path.pop_if_empty().extend(segments);
                }
                Ok(url)
            }

            /// Sends a GET request and deserializes the response.
            #[tracing::instrument(skip_all, fields(url = %url))]
            $($async_kw)? fn get_json<Resp: DeserializeOwned>(&self, url: Url) -> Result<Resp> {
                tracing::trace!("sending GET request");
                let response: $resp_type = self.http.get(url).send() $( .$await_ext )? ?;
                Self::handle_response(response) $( .$await_ext )?
            }

            /// Sends a JSON body with the given method and deserializes the
            /// response.
            #[tracing::instrument(skip_all, fields(method = %method, url = %url))]
            $($async_kw)? fn send_json<
                Req: Serialize $(+ $send_bound)?,
                Resp: DeserializeOwned,
            >(
                &self,
                method: Method,
                url: Url,
                body: &Req,
            ) -> Result<Resp> {
                tracing::trace!("sending request with JSON body");
                let response: $resp_type = self
                    .http
                    .request(method, url)
                    .json(body)
                    .send()
                    $( .$await_ext )?
                    ?;
                Self::handle_response(response) $( .$await_ext )?
            }

            /// Checks the status and deserializes the body, or turns the
            /// body into [`BudgetError::Api`].
            $($async_kw)? fn handle_response<T: DeserializeOwned>(
                response: $resp_type,
            ) -> Result<T> {
                let status = response.status();
                tracing::debug!(status = %status, "received response");
                if status.is_success() {
                    let body = response.text() $( .$await_ext )? ?;
                    tracing::trace!(body_len = body.len(), "parsing response body");
                    serde_json::from_str(&body).map_err(BudgetError::from)
                } else {
                    let message = response
                        .text()
                        $( .$await_ext )?
                        .unwrap_or_else(|_| "unknown error".to_owned());
                    tracing::debug!(status = status.as_u16(), message = %message, "API error");
                    Err(BudgetError::Api {
                        status: status.as_u16(),
                        message,
                    })
                }
            }
        }

    };
}

#[cfg(feature = "async")]
mod async_client {
    //! Async HTTP client for the budgeting backend.

    use core::time::Duration;

    use reqwest::Method;
    use serde::Serialize;
    use serde::de::DeserializeOwned;
    use url::Url;

    use super::DEFAULT_BASE_URL;
    use crate::error::{BudgetError, Result};
    use crate::models::{
        BalanceUpdate, Deposit, DepositDeletion, DepositId, Goal, GoalAmountUpdate, GoalId,
        GoalResponse, GoalsEnvelope, MessageResponse, NewDeposit, NewGoal, NewPurchase,
        PurchaseDeletion, Transaction, TransactionId, User, UserId,
    };

    define_client! {
        client_name: BudgetClient,
        builder_name: BudgetClientBuilder,
        http_type: reqwest::Client,
        response_type: reqwest::Response,
        client_doc: "Async client for the budgeting backend.\n\nUse [`BudgetClient::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`BudgetClient`].",
        async_kw: async,
        await_kw: await,
        send_bound: Sync,
    }
}

#[cfg(feature = "blocking")]
mod blocking_client {
    //! Blocking (synchronous) HTTP client for the budgeting backend.

    use core::time::Duration;

    use reqwest::Method;
    use serde::Serialize;
    use serde::de::DeserializeOwned;
    use url::Url;

    use super::DEFAULT_BASE_URL;
    use crate::error::{BudgetError, Result};
    use crate::models::{
        BalanceUpdate, Deposit, DepositDeletion, DepositId, Goal, GoalAmountUpdate, GoalId,
        GoalResponse, GoalsEnvelope, MessageResponse, NewDeposit, NewGoal, NewPurchase,
        PurchaseDeletion, Transaction, TransactionId, User, UserId,
    };

    define_client! {
        client_name: BudgetBlockingClient,
        builder_name: BudgetBlockingClientBuilder,
        http_type: reqwest::blocking::Client,
        response_type: reqwest::blocking::Response,
        client_doc: "Blocking (synchronous) client for the budgeting backend.\n\nUse [`BudgetBlockingClient::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`BudgetBlockingClient`].",
    }
}

#[cfg(feature = "async")]
pub use async_client::{BudgetClient, BudgetClientBuilder};
#[cfg(feature = "blocking")]
pub use blocking_client::{BudgetBlockingClient, BudgetBlockingClientBuilder};
