use wasm_bindgen::JsValue;
use web_sys::{WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader, WebGlUniformLocation};

pub fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl.create_shader(kind).ok_or("unable to create shader")?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let compiled = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if compiled {
        return Ok(shader);
    }

    let log = gl.get_shader_info_log(&shader).unwrap_or_default();
    gl.delete_shader(Some(&shader));
    Err(JsValue::from_str(&format!("shader compile failed: {log}")))
}

/// Compiles and links a vertex/fragment pair. The shaders are released once linked.
pub fn link_program(gl: &GL, vertex: &str, fragment: &str) -> Result<WebGlProgram, JsValue> {
    let vertex = compile_shader(gl, GL::VERTEX_SHADER, vertex)?;
    let fragment = compile_shader(gl, GL::FRAGMENT_SHADER, fragment)?;

    let program = gl.create_program().ok_or("unable to create program")?;
    gl.attach_shader(&program, &vertex);
    gl.attach_shader(&program, &fragment);
    gl.link_program(&program);

    gl.detach_shader(&program, &vertex);
    gl.detach_shader(&program, &fragment);
    gl.delete_shader(Some(&vertex));
    gl.delete_shader(Some(&fragment));

    let linked = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if linked {
        return Ok(program);
    }

    let log = gl.get_program_info_log(&program).unwrap_or_default();
    gl.delete_program(Some(&program));
    Err(JsValue::from_str(&format!("program link failed: {log}")))
}

pub fn attribute(gl: &GL, program: &WebGlProgram, name: &str) -> Result<u32, JsValue> {
    let location = gl.get_attrib_location(program, name);
    u32::try_from(location).map_err(|_| JsValue::from_str(&format!("missing attribute {name}")))
}

pub fn uniform(gl: &GL, program: &WebGlProgram, name: &str) -> Result<WebGlUniformLocation, JsValue> {
    gl.get_uniform_location(program, name)
        .ok_or_else(|| JsValue::from_str(&format!("missing uniform {name}")))
}

/// Creates an array buffer holding `data`.
pub fn static_buffer(gl: &GL, data: &[u8]) -> Result<WebGlBuffer, JsValue> {
    let buffer = gl.create_buffer().ok_or("unable to create buffer")?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    gl.buffer_data_with_u8_array(GL::ARRAY_BUFFER, data, GL::STATIC_DRAW);
    Ok(buffer)
}

/// Binds `buffer` to `location` as `size` floats read every `stride` bytes from
/// `offset`, advancing per instance when `divisor` is 1.
pub fn float_attribute(gl: &GL, buffer: &WebGlBuffer, location: u32, size: i32, stride: i32, offset: i32, divisor: u32) {
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(buffer));
    gl.enable_vertex_attrib_array(location);
    gl.vertex_attrib_pointer_with_i32(location, size, GL::FLOAT, false, stride, offset);
    gl.vertex_attrib_divisor(location, divisor);
}
