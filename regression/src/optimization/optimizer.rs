/// An update rule over a flat parameter buffer and its gradient.
pub trait Optimizer {
    fn update_params(&mut self, params: &mut [f32], grad: &[f32]);
}
