//! The host-supplied half of an HTTP exchange.

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes requests built by `TodoClient`.
///
/// Implementations return every HTTP status as an `HttpResponse`, including
/// 4xx and 5xx. `Err` is reserved for exchanges that produced no response at
/// all, reported as `ApiError::Transport`.
pub trait Transport {
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}
