// ============================================================
// Layer 5 — Generator and Discriminator
// ============================================================
// Two small fully connected networks sharing one body shape:
//
//   Generator:      z [N, d_noise]
//                   → Linear → LeakyReLU(0.2) → Dropout
//                   → Linear → LeakyReLU(0.2) → Dropout
//                   → Linear → tanh            [N, 784] in [-1, 1]
//
//   Discriminator:  x [N, 784]
//                   → Linear → LeakyReLU(0.2) → Dropout
//                   → Linear → LeakyReLU(0.2) → Dropout
//                   → Linear                   [N, 1] logit
//
// The discriminator exposes raw logits for the losses and
// sigmoid probabilities for evaluation.
//
// Reference: Burn Book §3 (Building Blocks),
//            Goodfellow et al. (2014)

use burn::{
    nn::{Dropout, DropoutConfig, LeakyRelu, LeakyReluConfig, Linear},
    prelude::*,
    tensor::activation::{sigmoid, tanh},
};

use crate::data::dataset::MNIST_PIXELS;
use crate::ml::init::init_linear;

const LEAKY_SLOPE: f64 = 0.2;

#[derive(Config, Debug)]
pub struct GeneratorConfig {
    pub d_noise:  usize,
    pub d_hidden: usize,
    #[config(default = 784)]
    pub d_image:  usize,
    #[config(default = 0.1)]
    pub dropout:  f64,
}

impl GeneratorConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Generator<B> {
        Generator {
            input:      init_linear(self.d_noise, self.d_hidden, device),
            hidden:     init_linear(self.d_hidden, self.d_hidden, device),
            output:     init_linear(self.d_hidden, self.d_image, device),
            activation: LeakyReluConfig::new().with_negative_slope(LEAKY_SLOPE).init(),
            dropout:    DropoutConfig::new(self.dropout).init(),
        }
    }
}

/// Noise [batch, d_noise] → image [batch, d_image] in [-1, 1]
#[derive(Module, Debug)]
pub struct Generator<B: Backend> {
    pub input:      Linear<B>,
    pub hidden:     Linear<B>,
    pub output:     Linear<B>,
    pub activation: LeakyRelu,
    pub dropout:    Dropout,
}

impl<B: Backend> Generator<B> {
    pub fn forward(&self, z: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.dropout.forward(self.activation.forward(self.input.forward(z)));
        let x = self.dropout.forward(self.activation.forward(self.hidden.forward(x)));
        tanh(self.output.forward(x))
    }
}

#[derive(Config, Debug)]
pub struct DiscriminatorConfig {
    pub d_hidden: usize,
    #[config(default = 784)]
    pub d_image:  usize,
    #[config(default = 0.1)]
    pub dropout:  f64,
}

impl DiscriminatorConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Discriminator<B> {
        Discriminator {
            input:      init_linear(self.d_image, self.d_hidden, device),
            hidden:     init_linear(self.d_hidden, self.d_hidden, device),
            output:     init_linear(self.d_hidden, 1, device),
            activation: LeakyReluConfig::new().with_negative_slope(LEAKY_SLOPE).init(),
            dropout:    DropoutConfig::new(self.dropout).init(),
        }
    }
}

/// Image [batch, d_image] → probability of being real [batch, 1]
#[derive(Module, Debug)]
pub struct Discriminator<B: Backend> {
    pub input:      Linear<B>,
    pub hidden:     Linear<B>,
    pub output:     Linear<B>,
    pub activation: LeakyRelu,
    pub dropout:    Dropout,
}

impl<B: Backend> Discriminator<B> {
    /// Raw scores before the sigmoid. The losses consume these directly.
    pub fn forward_logits(&self, images: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.dropout.forward(self.activation.forward(self.input.forward(images)));
        let x = self.dropout.forward(self.activation.forward(self.hidden.forward(x)));
        self.output.forward(x)
    }

    pub fn forward(&self, images: Tensor<B, 2>) -> Tensor<B, 2> {
        sigmoid(self.forward_logits(images))
    }
}

/// Both networks share the same shape parameters in a run.
pub fn gan_configs(d_noise: usize, d_hidden: usize, dropout: f64) -> (GeneratorConfig, DiscriminatorConfig) {
    (
        GeneratorConfig::new(d_noise, d_hidden)
            .with_d_image(MNIST_PIXELS)
            .with_dropout(dropout),
        DiscriminatorConfig::new(d_hidden)
            .with_d_image(MNIST_PIXELS)
            .with_dropout(dropout),
    )
}
