//! Request dispatcher: runs exactly one operation per request

use serde_json::Value;

use crate::ai::GeminiClient;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::math;
use crate::request::{Operation, Output};

pub struct Dispatcher {
    ai: GeminiClient,
}

impl Dispatcher {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            ai: GeminiClient::new(config.ai.clone())?,
        })
    }

    /// Decode a raw body and execute it
    pub async fn handle(&self, body: &Value) -> Result<Output> {
        let operation = Operation::from_body(body)?;
        self.execute(operation).await
    }

    pub async fn execute(&self, operation: Operation) -> Result<Output> {
        tracing::debug!(operation = operation.name(), "Dispatching");

        match operation {
            Operation::Fibonacci(n) => math::fibonacci(n)
                .map(Output::Sequence)
                .ok_or_else(|| Error::invalid_input("fibonacci term overflows u64")),
            Operation::Prime(numbers) => {
                run_blocking(move || {
                    Ok(Output::Integers(
                        numbers.into_iter().filter(|&n| math::is_prime(n)).collect(),
                    ))
                })
                .await
            }
            Operation::Lcm(numbers) => {
                run_blocking(move || lcm_of(&numbers).map(Output::Number)).await
            }
            Operation::Hcf(numbers) => {
                run_blocking(move || Ok(Output::Number(hcf_of(&numbers)))).await
            }
            Operation::Ai(question) => self.ai.answer_in_one_word(&question).await.map(Output::Text),
        }
    }
}

/// Run CPU-bound work on the blocking pool
async fn run_blocking<F>(work: F) -> Result<Output>
where
    F: FnOnce() -> Result<Output> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| Error::Task(e.to_string()))?
}

/// Left-to-right LCM reduction over absolute values
fn lcm_of(numbers: &[i64]) -> Result<u64> {
    let (first, rest) = numbers
        .split_first()
        .ok_or_else(|| Error::invalid_input("lcm must not be empty"))?;

    rest.iter().try_fold(first.unsigned_abs(), |acc, n| {
        math::lcm(acc, n.unsigned_abs())
            .ok_or_else(|| Error::invalid_input("lcm result overflows u64"))
    })
}

/// Left-to-right GCD reduction over absolute values
fn hcf_of(numbers: &[i64]) -> u64 {
    numbers
        .iter()
        .map(|n| n.unsigned_abs())
        .reduce(math::gcd)
        .unwrap_or(0)
}
